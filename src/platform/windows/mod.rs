//! Windows implementation: clipboard listener, layered popup, tray icon.
//!
//! Single-threaded by design. Every handle is created on the main thread
//! and every message handler runs there; the only "waiting" anywhere is a
//! `WM_TIMER`, so the loop never blocks.

pub mod app;
pub mod theme;
pub mod ui;
pub mod watcher;

use windows::Win32::System::Com::{CoInitializeEx, CoUninitialize, COINIT_APARTMENTTHREADED};
use windows::Win32::UI::WindowsAndMessaging::{
    DestroyWindow, DispatchMessageW, GetMessageW, TranslateMessage, MSG,
};

use crate::model::constants::APP_NAME;
use crate::startup;
use app::STATE;

/// Main entry point for Windows.
pub fn run() {
    if let Err(e) = run_app() {
        log::error!("fatal startup error: {e}");
        eprintln!("wordtoast error: {e}");
        std::process::exit(1);
    }
}

fn run_app() -> windows::core::Result<()> {
    unsafe {
        // Initialize COM (Direct2D factories want an apartment)
        CoInitializeEx(None, COINIT_APARTMENTTHREADED).ok()?;

        // Resolve the theme once; not refreshed while the process runs
        let theme_snapshot = theme::snapshot();
        log::info!(
            "starting: {} theme, label font {:?}",
            if theme_snapshot.is_light() { "light" } else { "dark" },
            theme_snapshot.font_family
        );
        STATE.with(|s| s.borrow_mut().theme = theme_snapshot.clone());

        // Direct2D / DirectWrite factories and the label text format
        ui::popup::init_graphics(&theme_snapshot)?;

        // Message-only clipboard watcher; registers the format listener
        // when its handle is created
        let watcher_hwnd = watcher::create_watcher_window()?;

        // One popup window for the process lifetime, created hidden
        let popup_hwnd = ui::popup::create_popup_window(&theme_snapshot)?;

        STATE.with(|s| {
            let mut state = s.borrow_mut();
            state.watcher_hwnd = watcher_hwnd;
            state.popup_hwnd = popup_hwnd;
        });

        // Tray icon with the Exit menu; tray messages go to the watcher
        ui::tray::install_tray_icon(watcher_hwnd);

        // Best-effort login-start registration
        match std::env::current_exe() {
            Ok(exe) => startup::register(APP_NAME, &exe),
            Err(e) => log::warn!("cannot resolve executable path: {e}"),
        }

        // Message loop; ends when the tray Exit posts WM_QUIT
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }

        // Teardown. Destroying the watcher runs its WM_DESTROY handler,
        // which removes the clipboard format listener.
        ui::tray::remove_tray_icon();
        let _ = DestroyWindow(popup_hwnd);
        let _ = DestroyWindow(watcher_hwnd);
        ui::popup::release_graphics();

        CoUninitialize();

        Ok(())
    }
}
