//! binwrap-launch - forwards every invocation to the provisioned binary
//!
//! Takes no flags of its own: argv past the program name goes to the child
//! untouched.

fn main() {
    binwrap_cli::init_tracing();

    let args = std::env::args_os().skip(1).collect();
    std::process::exit(binwrap_cli::cmd::launch::launch(args));
}
