use std::{env, fs};

use anyhow::{bail, Context, Result};
use atlaskit::{
    assets::{png::png_source, TextureManagerExt},
    textures::{TextureManager, TextureSource, TexturesConfig},
};

// cargo run --example inspect_atlas -- atlas.json atlas.png
// cargo run --example inspect_atlas -- atlas.json 512 512
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (json_path, source) = match args.as_slice() {
        [json, png] => {
            let bytes = fs::read(png).with_context(|| format!("reading {png}"))?;
            (json, png_source(&bytes)?)
        }
        [json, width, height] => (json, TextureSource::new(width.parse()?, height.parse()?)),
        _ => bail!("usage: inspect_atlas <atlas.json> (<image.png> | <width> <height>)"),
    };

    let text = fs::read_to_string(json_path).with_context(|| format!("reading {json_path}"))?;
    let json: serde_json::Value = serde_json::from_str(&text)?;

    let mut manager = TextureManager::new(TexturesConfig::default());
    let (texture, report) = manager.add_atlas("atlas", source, &json)?;

    for frame in texture.frames() {
        let uv = frame.uv();
        println!(
            "{:>4} {:<32} cut {:?} size {}x{} rotated {} uv ({:.4}, {:.4}) ({:.4}, {:.4})",
            frame.index(),
            frame.name(),
            frame.cut(),
            frame.width(),
            frame.height(),
            frame.rotated(),
            uv.u0,
            uv.v0,
            uv.u1,
            uv.v1,
        );
    }

    for (name, error) in &report.skipped {
        println!("skipped {name}: {error}");
    }

    Ok(())
}
