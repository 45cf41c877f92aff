//! Core demo modules A and B.
//!
//! Each hello/goodbye logs one info line and returns a fixed marker value so
//! callers can tell which module answered.

use tracing::info;

pub fn hello_from_core_module_a() -> i32 {
    info!("Hello from core_module_a");
    1
}

pub fn goodbye_from_core_module_a() -> i32 {
    info!("Goodbye from core_module_a");
    -1
}

pub fn hello_from_core_module_b() -> i32 {
    info!("Hello from core_module_b");
    2
}

pub fn goodbye_from_core_module_b() -> i32 {
    info!("Goodbye from core_module_b");
    -2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_a_markers() {
        assert_eq!(hello_from_core_module_a(), 1);
        assert_eq!(goodbye_from_core_module_a(), -1);
    }

    #[test]
    fn test_module_b_markers() {
        assert_eq!(hello_from_core_module_b(), 2);
        assert_eq!(goodbye_from_core_module_b(), -2);
    }
}
