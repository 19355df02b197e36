cfg_if::cfg_if! {
    if #[cfg(target_os = "windows")] {
        mod windows;
        pub use windows::SystemMounts;
    } else if #[cfg(target_family = "unix")] {
        mod unix;
        pub use unix::SystemMounts;
    } else {
        compile_error!("unsupported platform");
    }
}
