//! System tray (notification area) icon.
//!
//! The whole visible surface of the app: an icon, a tooltip, and a context
//! menu with a single Exit item.

use std::cell::RefCell;
use windows::core::w;
use windows::Win32::Foundation::{HWND, POINT};
use windows::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NOTIFYICONDATAW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    AppendMenuW, CreatePopupMenu, DestroyMenu, GetCursorPos, LoadIconW, SetForegroundWindow,
    TrackPopupMenu, HICON, HMENU, IDI_APPLICATION, MF_STRING, TPM_BOTTOMALIGN, TPM_LEFTALIGN,
    TPM_RIGHTBUTTON, WM_USER,
};

use crate::model::constants::TRAY_TOOLTIP;

// Custom message for tray icon events
pub const WM_TRAYICON: u32 = WM_USER + 1;

// Menu item IDs
pub const MENU_EXIT: u32 = 1001;

// Tray icon ID
const TRAY_ICON_ID: u32 = 1;

thread_local! {
    static TRAY_HWND: RefCell<Option<HWND>> = const { RefCell::new(None) };
    static TRAY_MENU: RefCell<Option<HMENU>> = const { RefCell::new(None) };
}

/// Install the tray icon with its context menu.
pub fn install_tray_icon(hwnd: HWND) {
    unsafe {
        TRAY_HWND.with(|h| *h.borrow_mut() = Some(hwnd));

        // Stock application icon; the binary ships no icon resource
        let hicon = LoadIconW(None, IDI_APPLICATION).unwrap_or(HICON::default());

        let mut nid = NOTIFYICONDATAW {
            cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
            hWnd: hwnd,
            uID: TRAY_ICON_ID,
            uFlags: NIF_ICON | NIF_MESSAGE | NIF_TIP,
            uCallbackMessage: WM_TRAYICON,
            hIcon: hicon,
            ..Default::default()
        };

        let tip_wide: Vec<u16> = TRAY_TOOLTIP.encode_utf16().collect();
        for (i, &c) in tip_wide.iter().enumerate().take(127) {
            nid.szTip[i] = c;
        }

        let _ = Shell_NotifyIconW(NIM_ADD, &nid);

        // Context menu
        let menu = CreatePopupMenu().unwrap_or_default();
        let _ = AppendMenuW(menu, MF_STRING, MENU_EXIT as usize, w!("Exit"));

        TRAY_MENU.with(|m| *m.borrow_mut() = Some(menu));
    }
}

/// Remove the tray icon.
pub fn remove_tray_icon() {
    TRAY_HWND.with(|h| {
        if let Some(hwnd) = *h.borrow() {
            unsafe {
                let nid = NOTIFYICONDATAW {
                    cbSize: std::mem::size_of::<NOTIFYICONDATAW>() as u32,
                    hWnd: hwnd,
                    uID: TRAY_ICON_ID,
                    ..Default::default()
                };
                let _ = Shell_NotifyIconW(NIM_DELETE, &nid);
            }
        }
    });

    TRAY_MENU.with(|m| {
        if let Some(menu) = m.borrow_mut().take() {
            unsafe {
                let _ = DestroyMenu(menu);
            }
        }
    });
}

/// Show the context menu at the cursor position.
pub fn show_tray_menu(hwnd: HWND) {
    TRAY_MENU.with(|m| {
        if let Some(menu) = *m.borrow() {
            unsafe {
                let mut pt = POINT::default();
                let _ = GetCursorPos(&mut pt);

                // Required for menu to close when clicking outside
                let _ = SetForegroundWindow(hwnd);

                let _ = TrackPopupMenu(
                    menu,
                    TPM_BOTTOMALIGN | TPM_LEFTALIGN | TPM_RIGHTBUTTON,
                    pt.x,
                    pt.y,
                    None, // nReserved - must be None/0
                    hwnd,
                    None,
                );
            }
        }
    });
}
