//! Terminal notification sink and navigator.

use std::sync::{Mutex, PoisonError};

use colored::Colorize;

use happy_core::{Appearance, Navigator, Notifier};

/// Prints notifications as coloured status lines.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str, appearance: Appearance) {
        match appearance {
            Appearance::Success => println!("{} {}", "✓".green().bold(), message.green()),
            Appearance::Error => eprintln!("{} {}", "✗".red().bold(), message.red()),
        }
    }
}

/// Remembers the last route pushed so the command can render it afterwards.
#[derive(Debug, Default)]
pub struct RouteNavigator {
    route: Mutex<Option<String>>,
}

impl RouteNavigator {
    pub fn take_route(&self) -> Option<String> {
        self.route
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Navigator for RouteNavigator {
    fn push(&self, route: &str) {
        tracing::debug!(route, "navigate");
        *self.route.lock().unwrap_or_else(PoisonError::into_inner) = Some(route.to_owned());
    }
}
