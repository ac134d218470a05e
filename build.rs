use std::{env, error::Error, fs, path::Path};

#[allow(dead_code)]
#[path = "src/template.rs"]
mod template;

#[allow(dead_code)]
#[path = "src/cfg_file.rs"]
mod cfg_file;

use cfg_file::{locate, RawConfig, CONFIG_FILE, TEMPLATE_FILE};

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if either file changes
    println!("cargo:rerun-if-changed={CONFIG_FILE}");
    println!("cargo:rerun-if-changed={TEMPLATE_FILE}");
    println!("cargo:rerun-if-changed=src/template.rs");
    println!("cargo:rerun-if-changed=src/cfg_file.rs");

    let firmware = env::var_os("CARGO_FEATURE_FIRMWARE").is_some();
    let (path, source) = locate(Path::new(CONFIG_FILE).exists(), firmware)?;
    if path == TEMPLATE_FILE {
        println!("cargo:warning={CONFIG_FILE} not found, building with the unedited {TEMPLATE_FILE}");
    }

    // Read and parse
    let toml_str = fs::read_to_string(path)?;
    let raw = RawConfig::parse(path, &toml_str)?;

    if path == CONFIG_FILE {
        for key in raw.placeholder_keys() {
            println!("cargo:warning={CONFIG_FILE}: `{key}` still holds its example value");
        }
    }

    // Generate Rust code
    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");
    fs::write(dest_path, cfg_file::generate(&raw, path, source))?;
    Ok(())
}
