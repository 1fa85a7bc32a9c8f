use std::env;
use std::fs;
use std::path::Path;

use clap::CommandFactory;

// The CLI definition lives in its own module with no dependencies beyond
// clap + clap_complete, so the build script can include and compile it
// standalone.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR is set for build scripts");
    let man_dir = Path::new(&out_dir).join("man");
    fs::create_dir_all(&man_dir).expect("OUT_DIR/man should be creatable");

    // One man page per command, breadth-first. Subcommand pages take the
    // hyphenated name (gamctl-devices-list.1) that man(1) resolves.
    let mut pending = vec![cli::Cli::command()];
    while let Some(cmd) = pending.pop() {
        let name = cmd.get_name().to_owned();

        let mut page = Vec::new();
        if let Err(e) = clap_mangen::Man::new(cmd.clone()).render(&mut page) {
            panic!("rendering man page `{name}`: {e}");
        }
        let target = man_dir.join(format!("{name}.1"));
        if let Err(e) = fs::write(&target, page) {
            panic!("writing {}: {e}", target.display());
        }

        for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
            pending.push(sub.clone().name(format!("{name}-{}", sub.get_name())));
        }
    }
}
