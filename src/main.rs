// SPDX-License-Identifier: MPL-2.0
use page_gallery::app::{self, Flags};

const HELP: &str = "\
Page Gallery

USAGE:
  page_gallery [OPTIONS]

OPTIONS:
  --lang <id>          Interface language (e.g. en-US, fr)
  --assets <dir>       Directory holding page1.<ext> .. pageN.<ext>
  --count <n>          Number of pages to show
  --config-dir <dir>   Directory containing settings.toml
  -h, --help           Print this help

PAGES:
  Pages are read from --assets, else gallery.asset_dir in settings.toml,
  else ./images. Missing pages are looked up in the images/ directory
  shipped with the sources.
";

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return Ok(());
    }

    let flags = match parse_flags(&mut args) {
        Ok(flags) => flags,
        Err(error) => {
            eprintln!("[ERROR] {error}");
            eprint!("{HELP}");
            std::process::exit(2);
        }
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        eprintln!("[WARN] Ignoring unexpected arguments: {remaining:?}");
    }

    app::run(flags)
}

fn parse_flags(args: &mut pico_args::Arguments) -> Result<Flags, pico_args::Error> {
    Ok(Flags {
        lang: args.opt_value_from_str("--lang")?,
        assets: args.opt_value_from_str("--assets")?,
        count: args.opt_value_from_str("--count")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
    })
}
