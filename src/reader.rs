// Typeface assembly.

use std::io::{Read, Seek};

use crate::directory::TableDirectory;
use crate::parser::Stream;
use crate::registry::Registry;
use crate::tables::*;
use crate::{Error, LayoutInfo, MathInfo, OutlineSource, Preview, Result, Typeface};

/// Resolves a mandatory table.
fn require<T: Table, R: Read + Seek>(
    registry: &mut Registry<'_, R>,
    input: T::Input<'_>,
) -> Result<T> {
    registry.resolve::<T>(input)?.ok_or(Error::MissingTable(T::TAG))
}

/// Decodes all known tables of a single font.
///
/// Tables are decoded in a fixed order, so each table's dependencies
/// are already available when it's decoded.
pub(crate) fn read_typeface<R: Read + Seek>(
    s: &mut Stream<R>,
    directory: TableDirectory,
) -> Result<Typeface> {
    debug!("Reading a font with {} tables at {}.", directory.len(), directory.offset);

    let mut registry = Registry::new(directory, s);

    let os2 = registry.resolve::<os2::Table>(())?;
    let name = registry.resolve::<name::Table>(())?;
    let head = require::<head::Table, _>(&mut registry, ())?;
    let maxp = require::<maxp::Table, _>(&mut registry, ())?;
    let hhea = require::<hhea::Table, _>(&mut registry, ())?;
    let hmtx = require::<hmtx::Table, _>(&mut registry, (&hhea, &maxp))?;
    let post = registry.resolve::<post::Table>(())?;
    let cff = registry.resolve::<cff::Table>(())?;
    let cmap = registry.resolve::<cmap::Table>(())?;

    let loca = registry.resolve::<loca::Table>((&head, &maxp))?;
    let glyf = match loca {
        Some(ref loca) => registry.resolve::<glyf::Table>(loca)?,
        None if registry.contains(glyf::Table::TAG) => {
            return Err(Error::MissingTable(loca::Table::TAG));
        }
        None => None,
    };

    let gasp = registry.resolve::<gasp::Table>(())?;
    let kern = registry.resolve::<kern::Table>(())?;

    let layout = LayoutInfo {
        gdef: registry.resolve::<gdef::Table>(())?,
        gsub: registry.resolve::<gsub::Table>(())?,
        gpos: registry.resolve::<gpos::Table>(())?,
        base: registry.resolve::<base::Table>(())?,
        colr: registry.resolve::<colr::Table>(())?,
        cpal: registry.resolve::<cpal::Table>(())?,
    };
    let layout = if layout.is_empty() { None } else { Some(layout) };

    let vhea = registry.resolve::<vhea::Table>(())?;
    let vmtx = match vhea {
        Some(ref vhea) => registry.resolve::<vmtx::Table>((vhea, &maxp))?,
        None => None,
    };

    let math = registry.resolve::<math::Table>(())?;

    let outlines = match (glyf, cff) {
        (Some(glyf), cff) => {
            if cff.is_some() {
                warn!("Font has both 'glyf' and 'CFF ' tables. 'CFF ' is ignored.");
            }

            OutlineSource::TrueType(glyf)
        }
        (None, Some(cff)) => OutlineSource::Compact(cff),
        (None, None) => return Err(Error::NoOutlineData),
    };

    let (fpgm, cvt, prep) = match outlines {
        OutlineSource::TrueType(_) => (
            registry.resolve::<fpgm::Table>(())?,
            registry.resolve::<cvt::Table>(())?,
            registry.resolve::<prep::Table>(())?,
        ),
        OutlineSource::Compact(_) => (None, None, None),
    };

    let svg = registry.resolve::<svg::Table>(())?;

    let directory = registry.into_directory();
    for header in directory.headers() {
        if !directory.get(header.tag).map_or(false, |e| e.is_resolved()) {
            debug!("Table '{}' was not decoded.", header.tag);
        }
    }

    let mut face = Typeface {
        os2,
        name,
        head,
        maxp,
        hhea,
        hmtx,
        post,
        cmap,
        outlines,
        gasp,
        kern,
        layout,
        vhea,
        vmtx,
        fpgm,
        cvt,
        prep,
        svg,
        math: None,
    };

    if let Some(math) = math {
        face.math = Some(MathInfo::new(math, &face));
    }

    Ok(face)
}

/// Reads `name` and `OS/2` tables only.
pub(crate) fn read_preview<R: Read + Seek>(
    s: &mut Stream<R>,
    directory: TableDirectory,
) -> Result<Preview> {
    let offset = directory.offset;
    let mut registry = Registry::new(directory, s);

    let name = registry.resolve::<name::Table>(())?;
    let os2 = registry.resolve::<os2::Table>(())?;

    let (name, subfamily_name) = match name {
        Some(ref name) => (
            name.family_name().unwrap_or_default(),
            name.subfamily_name().unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    };

    Ok(Preview {
        name,
        subfamily_name,
        weight: os2.map(|t| t.weight).unwrap_or_default(),
        is_bold: os2.map_or(false, |t| t.is_bold()),
        is_italic: os2.map_or(false, |t| t.is_italic()),
        offset,
        members: Vec::new(),
        collection: false,
    })
}
