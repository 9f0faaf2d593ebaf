/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use clap::{error::ErrorKind, Parser};
use newt::{Engine, EngineCommand};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so the board stays readable on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut engine = Engine::new();

    // Skip the executable name
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    // Every startup argument is a command, so find the longest run of arguments that parses as one
    let mut arg_idx = args.len();
    let mut parsed_idx = 0;
    while parsed_idx < arg_idx {
        let slice = &args[parsed_idx..arg_idx];

        match EngineCommand::try_parse_from(slice) {
            Ok(cmd) => {
                engine.send_command(cmd);
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            // Edge case: `--help` and `--version` are both "error" cases according to Clap
            Err(e)
                if matches!(e.kind(), ErrorKind::DisplayHelp)
                    || matches!(e.kind(), ErrorKind::DisplayVersion) =>
            {
                println!("{e}");
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            // Nothing starting here parses, so drop the first argument and move on
            Err(e) if arg_idx - parsed_idx == 1 => {
                eprintln!("{e}");
                parsed_idx = arg_idx;
                arg_idx = args.len();
            }

            Err(_) => arg_idx -= 1,
        }
    }

    if let Err(e) = engine.run() {
        tracing::error!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
    }
}
