use std::io::BufReader;
use std::path::PathBuf;

use tiny_skia_path::{PathBuilder, PathSegment, Transform};
use ttf_typeface::{GlyphId, OutlineBuilder, Typeface};

const FONT_SIZE: f32 = 128.0;
const COLUMNS: u32 = 50;

const HELP: &str = "\
Renders all glyphs of a font into an SVG grid.

USAGE:
  font2svg [OPTIONS] <FONT> <SVG>

OPTIONS:
  -h, --help        Prints help information
  --index INDEX     Sets a font collection member index [default: 0]
";

struct Args {
    index: u32,
    input: PathBuf,
    output: PathBuf,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = Args {
        index: args.opt_value_from_str("--index")?.unwrap_or(0),
        input: args.free_from_str()?,
        output: args.free_from_str()?,
    };

    Ok(args)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            print!("{}", HELP);
            std::process::exit(1);
        }
    };

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        std::process::exit(1);
    }
}

fn process(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let file = BufReader::new(std::fs::File::open(&args.input)?);
    let mut face = Typeface::from_collection(file, args.index)?;
    face.finalize()?;

    if face.is_cff() {
        return Err("CFF outlines are not supported".into());
    }

    let units_per_em = f32::from(face.units_per_em());
    let scale = FONT_SIZE / units_per_em;
    let cell_size = f32::from(face.height()) * scale;
    let rows = (f32::from(face.number_of_glyphs()) / COLUMNS as f32).ceil() as u32;

    let mut svg = xmlwriter::XmlWriter::new(xmlwriter::Options::default());
    svg.start_element("svg");
    svg.write_attribute("xmlns", "http://www.w3.org/2000/svg");
    svg.write_attribute_fmt(
        "viewBox",
        format_args!("{} {} {} {}", 0, 0, cell_size * COLUMNS as f32, cell_size * rows as f32),
    );

    draw_grid(face.number_of_glyphs(), cell_size, &mut svg);

    let mut row = 0;
    let mut column = 0;
    for id in 0..face.number_of_glyphs() {
        glyph_to_path(
            column as f32 * cell_size,
            row as f32 * cell_size,
            &face,
            GlyphId(id),
            cell_size,
            scale,
            &mut svg,
        );

        column += 1;
        if column == COLUMNS {
            column = 0;
            row += 1;
        }
    }

    std::fs::write(&args.output, svg.end_document())?;

    Ok(())
}

fn draw_grid(n_glyphs: u16, cell_size: f32, svg: &mut xmlwriter::XmlWriter) {
    let columns = COLUMNS;
    let rows = (f32::from(n_glyphs) / columns as f32).ceil() as u32;

    let width = columns as f32 * cell_size;
    let height = rows as f32 * cell_size;

    let mut builder = PathBuilder::new();

    let mut x = 0.0;
    for _ in 0..=columns {
        builder.move_to(x, 0.0);
        builder.line_to(x, height);
        x += cell_size;
    }

    let mut y = 0.0;
    for _ in 0..=rows {
        builder.move_to(0.0, y);
        builder.line_to(width, y);
        y += cell_size;
    }

    if let Some(path) = builder.finish() {
        svg.start_element("path");
        svg.write_attribute("fill", "none");
        svg.write_attribute("stroke", "black");
        svg.write_attribute("stroke-width", "5");
        svg.write_attribute("d", &path_data(&path));
        svg.end_element();
    }
}

fn glyph_to_path(
    x: f32,
    y: f32,
    face: &Typeface,
    glyph_id: GlyphId,
    cell_size: f32,
    scale: f32,
    svg: &mut xmlwriter::XmlWriter,
) {
    let mut builder = Builder(PathBuilder::new());
    if face.outline_glyph(glyph_id, &mut builder).is_none() {
        return;
    }

    let path = match builder.0.finish() {
        Some(v) => v,
        None => return,
    };

    let advance = face.glyph_hor_advance(glyph_id).map_or(0.0, f32::from);
    let dx = (cell_size - advance * scale) / 2.0;
    let ts = Transform::from_row(
        scale, 0.0, 0.0, -scale,
        x + dx, y + f32::from(face.ascender()) * scale,
    );

    let path = match path.transform(ts) {
        Some(v) => v,
        None => return,
    };

    svg.start_element("path");
    svg.write_attribute("d", &path_data(&path));
    svg.end_element();
}

fn path_data(path: &tiny_skia_path::Path) -> String {
    use std::fmt::Write;

    let mut s = String::new();
    for segment in path.segments() {
        let _ = match segment {
            PathSegment::MoveTo(p) => write!(s, "M {} {} ", p.x, p.y),
            PathSegment::LineTo(p) => write!(s, "L {} {} ", p.x, p.y),
            PathSegment::QuadTo(p1, p) => write!(s, "Q {} {} {} {} ", p1.x, p1.y, p.x, p.y),
            PathSegment::CubicTo(p1, p2, p) => {
                write!(s, "C {} {} {} {} {} {} ", p1.x, p1.y, p2.x, p2.y, p.x, p.y)
            }
            PathSegment::Close => write!(s, "Z "),
        };
    }

    s.pop();
    s
}

struct Builder(PathBuilder);

impl OutlineBuilder for Builder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.0.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.0.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.0.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.0.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.0.close();
    }
}
