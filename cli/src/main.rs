use std::process::ExitCode;

use tracing::debug;
use tracing_subscriber::EnvFilter;
use typed_cmdline_core::{ArgDef, ArgError, Parser};

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_parser() -> Result<Parser, ArgError> {
    let mut parser = Parser::new();
    parser.add(
        ArgDef::<String>::required("--stringArg")
            .with_short("-s")
            .with_description("this is a string argument"),
    )?;
    parser.add(
        ArgDef::<i32>::required("--intArg")
            .with_short("-i")
            .with_description("this is a int argument with default value 1")
            .with_default(1),
    )?;
    parser.add(
        ArgDef::<f32>::optional("--floatArg")
            .with_short("-f")
            .with_description(
                "this is a float argument with default value 0.1, and should be in [0.1, 0.01, 0.001]",
            )
            .with_default(0.1)
            .with_choices([0.1, 0.01, 0.001]),
    )?;
    parser.add(
        ArgDef::<bool>::optional("--boolArg")
            .with_description("this is a bool argument with default value true")
            .with_default(true),
    )?;
    Ok(parser)
}

fn run() -> Result<(), ArgError> {
    // A bare invocation prints usage and exits with status 1 inside parse().
    let args = build_parser()?.parse()?;
    debug!(program = args.program_name(), "Arguments parsed");

    let string_arg = args.get::<String>("--stringArg")?;
    let int_arg = args.get::<i32>("-i")?;
    let float_arg = args.get::<f32>("-f")?;
    let bool_arg = args.get::<bool>("--boolArg")?;

    println!(
        "stringArg: {string_arg}, intArg: {int_arg}, floatArg: {float_arg}, boolArg: {bool_arg}"
    );
    Ok(())
}
