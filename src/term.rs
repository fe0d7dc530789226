use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
pub use termcolor::Color;
use termcolor::{ColorChoice, StandardStream};

static COLOR_CHOICE: OnceLock<ColorChoice> = OnceLock::new();

pub static STDOUT: std::sync::LazyLock<Mutex<StandardStream>> = std::sync::LazyLock::new(|| {
    let choice = COLOR_CHOICE.get().copied().unwrap_or(ColorChoice::Auto);
    Mutex::new(StandardStream::stdout(choice))
});

/// Must be called before anything is written to [`STDOUT`].
pub fn set_color_choice(choice: ColorChoice) {
    _ = COLOR_CHOICE.set(choice);
}

pub fn stdout() -> MutexGuard<'static, StandardStream> {
    STDOUT.lock().unwrap_or_else(PoisonError::into_inner)
}

/// We need to filter out onig panic messages.
pub fn ensure_panic_hook() {
    static PANIC_HOOK_LOCK: OnceLock<()> = OnceLock::new();
    PANIC_HOOK_LOCK.get_or_init(|| {
        let old_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let payload = panic_info.payload();
            if let Some(s) = payload.downcast_ref::<String>() {
                if s.contains("Onig: Regex search error:") {
                    return;
                }
            }
            old_hook(panic_info);
        }));
    });
}

#[macro_export]
macro_rules! cwriteln {
    ($stream:expr) => {
        {
            #[allow(unused_imports)]
            use std::io::Write;
            use termcolor::{WriteColor, ColorSpec};
            _ = $stream.set_color(&ColorSpec::new());
            _ = writeln!($stream);
        }
    };
    ($stream:expr, $(fg=$fg:expr,)? $(bold=$bold:expr,)? $(dimmed=$dimmed:expr,)? $literal:literal $($arg:tt)*) => {
        {
            #[allow(unused_imports)]
            use std::io::Write;
            $crate::cwrite!($stream, $(fg=$fg,)? $(bold=$bold,)? $(dimmed=$dimmed,)? $literal $($arg)*);
            _ = writeln!($stream);
        }
    };
}

#[macro_export]
macro_rules! cwrite {
    ($stream:expr, $(fg=$fg:expr,)? $(bold=$bold:expr,)? $(dimmed=$dimmed:expr,)? $literal:literal $($arg:tt)*) => {
        {
            #[allow(unused_imports)]
            use termcolor::{WriteColor, ColorSpec};
            #[allow(unused_imports)]
            use std::io::Write;

            #[allow(unused_mut)]
            let mut color = ColorSpec::new();
            $(
                color.set_fg(Some($fg));
            )?
            $(
                color.set_bold($bold);
            )?
            $(
                color.set_dimmed($dimmed);
            )?
            _ = $stream.set_color(&color);
            _ = write!($stream, $literal $($arg)*);
            _ = $stream.set_color(&ColorSpec::new());
        }
    };
}

#[macro_export]
macro_rules! cprintln {
    () => {
        {
            let mut stdout = $crate::term::stdout();
            $crate::cwriteln!(&mut *stdout);
        }
    };
    ($(fg=$fg:expr,)? $(bold=$bold:expr,)? $(dimmed=$dimmed:expr,)? $literal:literal $($arg:tt)*) => {
        {
            let mut stdout = $crate::term::stdout();
            $crate::cwriteln!(&mut *stdout, $(fg=$fg,)? $(bold=$bold,)? $(dimmed=$dimmed,)? $literal $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! cprint {
    ($(fg=$fg:expr,)? $(bold=$bold:expr,)? $(dimmed=$dimmed:expr,)? $literal:literal $($arg:tt)*) => {
        {
            let mut stdout = $crate::term::stdout();
            $crate::cwrite!(&mut *stdout, $(fg=$fg,)? $(bold=$bold,)? $(dimmed=$dimmed,)? $literal $($arg)*);
        }
    };
}
