// SPDX-License-Identifier: MPL-2.0
use lens_pager::app::{self, paths, Flags};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "LENS_PAGER_LOG";

const USAGE: &str = "\
Usage: lens_pager [--lang LANG] [--config-dir DIR] [SOURCE...]

SOURCE is a file path or an http(s) URL. Without sources three
placeholder pages are shown.";

fn parse_flags() -> Result<Flags, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        println!("{USAGE}");
        std::process::exit(0);
    }

    let lang = args.opt_value_from_str("--lang")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let sources = args
        .finish()
        .into_iter()
        .filter_map(|s| s.into_string().ok())
        .collect();

    Ok(Flags {
        lang,
        config_dir,
        sources,
    })
}

fn main() -> iced::Result {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new("lens_pager=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let flags = match parse_flags() {
        Ok(flags) => flags,
        Err(err) => {
            tracing::error!(%err, "invalid arguments");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    paths::init_cli_overrides(flags.config_dir.clone());
    app::run(flags)
}
