use std::io::BufReader;
use std::path::PathBuf;

const HELP: &str = "\
Prints font information.

USAGE:
  font-info [OPTIONS] <FONT>

OPTIONS:
  -h, --help        Prints help information
  --index INDEX     Sets a font collection member index [default: 0]
  --preview         Reads only the name and OS/2 tables
";

struct Args {
    index: u32,
    preview: bool,
    path: PathBuf,
}

fn parse_args() -> Result<Args, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = Args {
        index: args.opt_value_from_str("--index")?.unwrap_or(0),
        preview: args.contains("--preview"),
        path: args.free_from_str()?,
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
    let file = BufReader::new(std::fs::File::open(&args.path)?);

    let now = std::time::Instant::now();

    if args.preview {
        let preview = ttf_typeface::Preview::from_reader(file)?;
        print_preview(&preview, 0);
        println!("Elapsed: {}us", now.elapsed().as_micros());
        return Ok(());
    }

    let mut face = ttf_typeface::Typeface::from_collection(file, args.index)?;
    face.finalize()?;

    println!("Family name: {:?}", face.family_name());
    println!("PostScript name: {:?}", face.post_script_name());
    println!("Units per EM: {:?}", face.units_per_em());
    println!("Ascender: {}", face.ascender());
    println!("Descender: {}", face.descender());
    println!("Line gap: {}", face.line_gap());
    println!("Global bbox: {:?}", face.bounding_box());
    println!("Number of glyphs: {:?}", face.number_of_glyphs());
    println!("Outlines: {}", if face.is_cff() { "CFF" } else { "TrueType" });
    println!("Underline: {:?}", face.underline_metrics());
    println!("X height: {:?}", face.x_height());
    println!("Weight: {:?}", face.weight());
    println!("Width: {:?}", face.width());
    println!("Regular: {}", face.os2().map_or(false, |t| t.is_regular()));
    println!("Italic: {}", face.is_italic());
    println!("Bold: {}", face.is_bold());
    println!("Oblique: {}", face.os2().map_or(false, |t| t.is_oblique()));
    println!("Strikeout: {:?}", face.strikeout_metrics());
    println!("Monospaced: {}", face.is_monospaced());
    println!("Vertical: {}", face.is_vertical());
    println!("Has layout info: {}", face.has_layout_info());
    println!("Has color layers: {}", face.has_color_layers());
    println!("Has math info: {}", face.has_math_info());

    if let Some(layout) = face.layout() {
        let mut tables = Vec::new();
        if layout.gdef.is_some() { tables.push("GDEF"); }
        if layout.gsub.is_some() { tables.push("GSUB"); }
        if layout.gpos.is_some() { tables.push("GPOS"); }
        if layout.base.is_some() { tables.push("BASE"); }
        if layout.colr.is_some() { tables.push("COLR"); }
        if layout.cpal.is_some() { tables.push("CPAL"); }
        println!("Layout tables: {}", tables.join(", "));
    }

    if let Some(constants) = face.math().and_then(|m| m.constants()) {
        println!("Math axis height: {}", constants.axis_height);
    }

    println!("Elapsed: {}us", now.elapsed().as_micros());

    Ok(())
}

fn print_preview(preview: &ttf_typeface::Preview, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{}Name: {}", indent, preview.name);
    if !preview.is_collection() {
        println!("{}Subfamily: {}", indent, preview.subfamily_name);
        println!("{}Weight: {}", indent, preview.weight.to_number());
    }
    println!("{}Offset: {}", indent, preview.offset);

    for member in &preview.members {
        print_preview(member, depth + 1);
    }
}
