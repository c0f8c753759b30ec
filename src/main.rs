//! Tray-only entry point. There is no main window; the process lives in the
//! notification area until Exit is chosen from the tray menu.

fn main() {
    env_logger::init();

    #[cfg(target_os = "windows")]
    wordtoast::platform::windows::run();

    #[cfg(not(target_os = "windows"))]
    {
        eprintln!("wordtoast only runs on Windows.");
        std::process::exit(1);
    }
}
