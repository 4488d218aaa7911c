use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use clap::CommandFactory;

// cli.rs only depends on clap + clap_complete (both build-dependencies),
// so it can be compiled here on its own.
#[path = "src/cli.rs"]
#[allow(dead_code)]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        panic!("OUT_DIR not set by Cargo");
    };
    let man_dir = Path::new(&out_dir).join("man");
    if let Err(e) = fs::create_dir_all(&man_dir) {
        panic!("failed to create {}: {e}", man_dir.display());
    }

    // Walk the command tree breadth-first, one page per visible command.
    let mut queue = VecDeque::from([(String::from("podalert"), cli::Cli::command())]);
    while let Some((page, cmd)) = queue.pop_front() {
        for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
            let sub_page = format!("{page}-{}", sub.get_name());
            queue.push_back((sub_page.clone(), sub.clone().name(sub_page)));
        }
        write_manpage(&man_dir, &page, cmd);
    }
}

fn write_manpage(dir: &Path, page: &str, cmd: clap::Command) {
    let mut buf = Vec::new();
    if let Err(e) = clap_mangen::Man::new(cmd).render(&mut buf) {
        panic!("failed to render man page for `{page}`: {e}");
    }
    let path = dir.join(format!("{page}.1"));
    if let Err(e) = fs::write(&path, buf) {
        panic!("failed to write {}: {e}", path.display());
    }
}
