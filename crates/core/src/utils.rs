//! The `hello_from_utils` collaborator
//!
//! The greeting entry point does not own the utils behaviour; it is handed
//! something implementing [`HelloUtils`]. Production code uses
//! [`PrintUtils`]; tests pass a closure.

use tracing::info;

/// A callable that takes a short identifying tag and returns nothing
pub trait HelloUtils {
    fn hello_from_utils(&mut self, tag: &str);
}

impl<F: FnMut(&str)> HelloUtils for F {
    fn hello_from_utils(&mut self, tag: &str) {
        self(tag)
    }
}

/// Default collaborator: one line on stdout, one info event
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintUtils;

impl PrintUtils {
    pub fn message(tag: &str) -> String {
        format!("Hello from utils, called by {}!", tag)
    }
}

impl HelloUtils for PrintUtils {
    fn hello_from_utils(&mut self, tag: &str) {
        info!(tag, "Hello from utils");
        println!("{}", Self::message(tag));
    }
}

/// Tag-less hello used by the application runner. Only logs.
pub fn hello_from_utils() {
    info!("Hello from utils");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_collaborator() {
        let mut seen = Vec::new();
        {
            let mut utils = |tag: &str| seen.push(tag.to_string());
            utils.hello_from_utils("cmodulea");
            utils.hello_from_utils("cmoduleb");
        }
        assert_eq!(seen, vec!["cmodulea", "cmoduleb"]);
    }

    #[test]
    fn test_print_utils_message() {
        assert_eq!(
            PrintUtils::message("cmodulea"),
            "Hello from utils, called by cmodulea!"
        );
    }
}
