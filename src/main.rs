use hush::flags::Flags;
use hush::shell::Shell;
use std::env;

fn main() -> Result<(), hush::error::ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("hush {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    hush::logging::init(flags.is_set("debug"));

    let mut shell = Shell::new(&flags)?;
    shell.run()
}
