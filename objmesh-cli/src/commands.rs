/// Command implementations.
use objmesh_core::{
    count_records, decode_text, load_from_text_with, load_with, DegenerateFaces, EulerAngles, Mesh,
    ObjError, ParseOptions,
};
use tracing::debug;

use crate::cli::{DumpArgs, LoadArgs};

type CommandResult = Result<(), Box<dyn std::error::Error>>;

fn parse_options(args: &LoadArgs) -> ParseOptions {
    if args.strict {
        ParseOptions::strict()
    } else {
        ParseOptions::lenient()
    }
}

fn load_mesh(args: &LoadArgs) -> Result<Mesh, Box<dyn std::error::Error>> {
    debug!(file = %args.file.display(), strict = args.strict, "Loading mesh");
    Ok(load_with(&args.file, &parse_options(args))?)
}

/// Print record counts for a file.
pub fn info(args: &LoadArgs) -> CommandResult {
    debug!(file = %args.file.display(), strict = args.strict, "Reading mesh records");
    let options = parse_options(args);
    let bytes = std::fs::read(&args.file).map_err(|source| ObjError::Io {
        path: args.file.clone(),
        source,
    })?;
    let text = decode_text(&bytes, options.mode)?;
    let mesh = load_from_text_with(&text, &options)?;
    let counts = count_records(&text);

    println!("{}", args.file.display());
    println!("  vertices:  {}", mesh.vertex_count());
    println!("  texcoords: {}", mesh.texcoord_count());
    println!("  normals:   {}", mesh.normal_count());
    println!("  faces:     {}", mesh.face_count());
    println!("  comments:  {}", counts.comments);
    Ok(())
}

/// Apply the requested operations and print the debug dump.
pub fn dump(args: &DumpArgs) -> CommandResult {
    let mut mesh = load_mesh(&args.load)?;
    apply(&mut mesh, args)?;
    print!("{}", mesh.debug_dump());
    Ok(())
}

/// Normals first, then rotate, translate and scale.
fn apply(mesh: &mut Mesh, args: &DumpArgs) -> CommandResult {
    if args.normals {
        let policy = if args.skip_degenerate {
            DegenerateFaces::Skip
        } else {
            DegenerateFaces::Reject
        };
        mesh.compute_normals_with(policy)?;
    }
    if let Some(angles) = args.rotate {
        mesh.rotate_by(&EulerAngles::new(angles.x, angles.y, angles.z));
    }
    if let Some(offset) = args.translate {
        mesh.translate(offset.x, offset.y, offset.z);
    }
    if let Some(factor) = args.scale {
        mesh.scale(factor);
    }
    Ok(())
}
