//! OS theme queries and window chrome hints.
//!
//! Registry reads for the light/dark preference and the Segoe UI Variable
//! check; DWM attribute calls for dark title-bar chrome and rounded
//! corners. All of it is best effort: older builds lack the DWM attributes
//! and locked-down machines may refuse the registry, and the popup must
//! still render with its defaults.

use core::ffi::c_void;

use windows::core::w;
use windows::Win32::Foundation::{ERROR_SUCCESS, HWND};
use windows::Win32::Graphics::Dwm::{
    DwmSetWindowAttribute, DWMWA_USE_IMMERSIVE_DARK_MODE, DWMWA_WINDOW_CORNER_PREFERENCE,
    DWMWCP_ROUND, DWM_WINDOW_CORNER_PREFERENCE,
};
use windows::Win32::System::Registry::{
    RegCloseKey, RegOpenKeyExW, RegQueryValueExW, HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE,
    KEY_READ,
};

use crate::model::constants::{FONT_FALLBACK, FONT_VARIABLE};
use crate::model::theme::ThemeSnapshot;

/// Resolve the palette and label font from the OS, once.
pub fn snapshot() -> ThemeSnapshot {
    ThemeSnapshot::resolve(is_app_light_theme(), preferred_font_family())
}

/// Whether apps are asked to use the light theme. Defaults to light when
/// the value is missing or unreadable.
pub fn is_app_light_theme() -> bool {
    unsafe {
        let mut key = HKEY::default();
        let status = RegOpenKeyExW(
            HKEY_CURRENT_USER,
            w!(r"Software\Microsoft\Windows\CurrentVersion\Themes\Personalize"),
            Some(0),
            KEY_READ,
            &mut key,
        );
        if status != ERROR_SUCCESS {
            return true;
        }

        let mut value: u32 = 0;
        let mut size = std::mem::size_of::<u32>() as u32;
        let status = RegQueryValueExW(
            key,
            w!("AppsUseLightTheme"),
            None,
            None,
            Some(&mut value as *mut u32 as *mut u8),
            Some(&mut size),
        );
        let _ = RegCloseKey(key);

        if status != ERROR_SUCCESS {
            return true;
        }
        value != 0
    }
}

/// "Segoe UI Variable Display" where the font ships, "Segoe UI" elsewhere.
pub fn preferred_font_family() -> &'static str {
    if segoe_ui_variable_installed() {
        FONT_VARIABLE
    } else {
        FONT_FALLBACK
    }
}

fn segoe_ui_variable_installed() -> bool {
    unsafe {
        let mut key = HKEY::default();
        let status = RegOpenKeyExW(
            HKEY_LOCAL_MACHINE,
            w!(r"SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts"),
            Some(0),
            KEY_READ,
            &mut key,
        );
        if status != ERROR_SUCCESS {
            return false;
        }

        // Probe for the value's existence; the data itself is irrelevant
        let mut size = 0u32;
        let status = RegQueryValueExW(
            key,
            w!("Segoe UI Variable (TrueType)"),
            None,
            None,
            None,
            Some(&mut size),
        );
        let _ = RegCloseKey(key);

        status == ERROR_SUCCESS
    }
}

/// Ask DWM for dark (or light) window chrome. Ignored on older builds.
pub fn try_apply_dark_mode(hwnd: HWND, dark: bool) {
    let value: i32 = if dark { 1 } else { 0 };
    unsafe {
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWA_USE_IMMERSIVE_DARK_MODE,
            &value as *const i32 as *const c_void,
            std::mem::size_of::<i32>() as u32,
        );
    }
}

/// Ask DWM to round the window's corners. Ignored on older builds.
pub fn try_apply_rounded_corners(hwnd: HWND) {
    let preference = DWMWCP_ROUND;
    unsafe {
        let _ = DwmSetWindowAttribute(
            hwnd,
            DWMWA_WINDOW_CORNER_PREFERENCE,
            &preference as *const DWM_WINDOW_CORNER_PREFERENCE as *const c_void,
            std::mem::size_of::<DWM_WINDOW_CORNER_PREFERENCE>() as u32,
        );
    }
}
