use std::env;
use std::ffi::OsStr;

use log::{error, info};
use seahorse::{App, Command, Context, Flag, FlagType};

use stats_sheet::calendar::SheetKind;
use stats_sheet::{generate_stats_sheets, Config, SheetArgs};

fn set_env_if_absent<K: AsRef<OsStr>, V: AsRef<OsStr>>(var: K, default: impl FnOnce() -> V) {
    if env::var(var.as_ref()).is_err() {
        env::set_var(var, default());
    }
}

fn main() {
    set_env_if_absent("RUST_APP_LOG", || "info");
    color_backtrace::install();
    pretty_env_logger::init_custom_env("RUST_APP_LOG");

    if let Err(e) = run() {
        error!("{:?}", e);
        ::std::process::exit(1);
    }
}

mod seahorse_exts {
    use std::path::PathBuf;

    use log::error;
    use seahorse::error::FlagError;
    use seahorse::Context;

    /// Logs the error of a command and exits, seahorse actions can not return errors.
    pub fn exit_on_error(result: anyhow::Result<()>) {
        if let Err(e) = result {
            error!("{:?}", e);
            ::std::process::exit(1);
        }
    }

    fn optional<T>(name: &str, value: Result<T, FlagError>) -> anyhow::Result<Option<T>> {
        match value {
            Ok(value) => Ok(Some(value)),
            Err(FlagError::NotFound) => Ok(None),
            Err(e) => Err(anyhow::anyhow!("invalid flag \"{}\": {:?}", name, e)),
        }
    }

    pub trait ContextExt {
        fn context(&self) -> &Context;

        fn optional_string_flag(&self, name: &str) -> anyhow::Result<Option<String>> {
            optional(name, self.context().string_flag(name))
        }

        fn optional_int_flag(&self, name: &str) -> anyhow::Result<Option<isize>> {
            optional(name, self.context().int_flag(name))
        }

        fn optional_path_flag(&self, name: &str) -> anyhow::Result<Option<PathBuf>> {
            Ok(self.optional_string_flag(name)?.map(PathBuf::from))
        }
    }

    impl ContextExt for Context {
        fn context(&self) -> &Context {
            self
        }
    }
}

use seahorse_exts::{exit_on_error, ContextExt};

fn sheet_args(context: &Context, kind: SheetKind) -> anyhow::Result<SheetArgs> {
    Ok(SheetArgs {
        start: context.optional_string_flag("start")?,
        weeks: context.optional_int_flag("weeks")?,
        outfile: context.optional_path_flag("outfile")?,
        name: match kind {
            SheetKind::Daily => context.optional_string_flag("name")?,
            SheetKind::Weekly => None,
        },
        settings: context.optional_path_flag("config")?,
        preserve_dir: context.optional_path_flag("preserve-dir")?,
        tex: context.bool_flag("tex"),
    })
}

fn make(kind: SheetKind, context: &Context) -> anyhow::Result<()> {
    // everything is validated before anything is written
    let config = Config::try_from_args(kind, &sheet_args(context, kind)?)?;

    generate_stats_sheets(&config)?;

    info!(
        "wrote {}",
        dunce::canonicalize(config.output())?.display()
    );

    Ok(())
}

fn common_flags(command: Command) -> Command {
    command
        .flag(
            Flag::new("start", FlagType::String).description(
                "[optional] Any date in the first week, formatted as YYYY-MM-DD. Default: today",
            ),
        )
        .flag(
            Flag::new("weeks", FlagType::Int)
                .description("[optional] Number of consecutive weeks to generate. Default: 1"),
        )
        .flag(
            Flag::new("outfile", FlagType::String)
                .description("[optional] Path of the generated file. Default: `stats_sheets.pdf`"),
        )
        .flag(
            Flag::new("config", FlagType::String).description(
                "[optional] Path to a toml file with custom categories, durations and time blocks.",
            ),
        )
        .flag(Flag::new("preserve-dir", FlagType::String).description(
            "[optional] Copies the latex working directory here if compiling fails.",
        ))
        .flag(
            Flag::new("tex", FlagType::Bool)
                .description("[optional] Writes the latex source instead of a pdf. Default: false"),
        )
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let day_command = common_flags(
        Command::new("day")
            .usage(format!("{} day [args]", args[0]))
            .description("Makes one portrait sheet per day."),
    )
    .flag(
        Flag::new("name", FlagType::String)
            .description("[optional] Name printed in the header. Default: `Library`"),
    )
    .action(|context: &Context| exit_on_error(make(SheetKind::Daily, context)));

    let week_command = common_flags(
        Command::new("week")
            .usage(format!("{} week [args]", args[0]))
            .description("Makes one landscape sheet per week."),
    )
    .action(|context: &Context| exit_on_error(make(SheetKind::Weekly, context)));

    let app = App::new(env!("CARGO_PKG_NAME"))
        .description(env!("CARGO_PKG_DESCRIPTION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .usage(format!("{} [args]", args[0]))
        .command(day_command)
        .command(week_command);

    app.run(args);

    Ok(())
}
