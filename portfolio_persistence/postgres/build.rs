use std::{collections::BTreeMap, io::Write, path::PathBuf};

fn main() {
    println!("cargo::rerun-if-changed=migrations");

    let mut migrations = BTreeMap::<String, (String, String)>::new();
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    for file in dir.read_dir().unwrap() {
        let file = file.unwrap();
        let name = file.file_name().into_string().unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        if let Some(name) = name.strip_suffix(".up.sql") {
            migrations.entry(name.into()).or_default().0 = content;
        } else if let Some(name) = name.strip_suffix(".down.sql") {
            migrations.entry(name.into()).or_default().1 = content;
        }
    }

    let path = PathBuf::from(std::env::var("OUT_DIR").unwrap()).join("migrations.rs");
    let mut out = std::io::BufWriter::new(std::fs::File::create(&path).unwrap());
    write!(&mut out, "&[").unwrap();
    for (name, (up, down)) in migrations {
        write!(&mut out, "Migration{{name:{name:?},up:{up:?},down:{down:?}}},").unwrap();
    }
    write!(&mut out, "]").unwrap();
    out.flush().unwrap();

    println!("cargo::rustc-env=MIGRATIONS={}", path.display());
}
