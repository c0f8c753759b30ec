//! Clipboard change watcher.
//!
//! A message-only window subscribes to `WM_CLIPBOARDUPDATE` through
//! `AddClipboardFormatListener`. The subscription is tied to the handle's
//! lifetime: registered in `WM_CREATE`, removed in `WM_DESTROY`, so even an
//! abnormal teardown that destroys the window unhooks the listener.
//!
//! The window also doubles as the tray icon's message sink and drives the
//! clipboard read retries with a timer, keeping the whole pipeline on the
//! one UI thread without ever blocking it.

use windows::core::w;
use windows::Win32::Foundation::{HANDLE, HGLOBAL, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::DataExchange::{
    AddClipboardFormatListener, CloseClipboard, GetClipboardData, IsClipboardFormatAvailable,
    OpenClipboard, RemoveClipboardFormatListener,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::System::Memory::{GlobalLock, GlobalUnlock};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, KillTimer, PostQuitMessage, RegisterClassW, SetTimer,
    HWND_MESSAGE, WINDOW_EX_STYLE, WINDOW_STYLE, WM_COMMAND, WM_CREATE, WM_DESTROY, WM_TIMER,
    WNDCLASSW,
};

use crate::clipboard::{ClipboardAccess, ClipboardError, ReadInFlight, ReadStep};
use crate::platform::windows::app::STATE;
use crate::platform::windows::ui::{popup, tray};

/// Timer driving the delay between clipboard read attempts.
pub const TIMER_CLIPBOARD_RETRY: usize = 1;

// Posted by the OS whenever clipboard content changes.
const WM_CLIPBOARDUPDATE: u32 = 0x031D;

// Clipboard format: UTF-16 text.
const CF_UNICODETEXT: u32 = 13;

/// Create the hidden watcher window. Never visible, never focused, never in
/// the task switcher: a message-only window has no UI at all.
pub fn create_watcher_window() -> windows::core::Result<HWND> {
    unsafe {
        let instance = GetModuleHandleW(None)?;
        let class_name = w!("WordToastWatcher");

        let wc = WNDCLASSW {
            lpfnWndProc: Some(watcher_wndproc),
            hInstance: instance.into(),
            lpszClassName: class_name,
            ..Default::default()
        };
        RegisterClassW(&wc);

        CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            class_name,
            w!("WordToast clipboard watcher"),
            WINDOW_STYLE::default(),
            0,
            0,
            0,
            0,
            Some(HWND_MESSAGE),
            None,
            Some(instance.into()),
            None,
        )
    }
}

extern "system" fn watcher_wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_CREATE => {
                if let Err(e) = AddClipboardFormatListener(hwnd) {
                    log::warn!("clipboard listener registration failed: {e}");
                }
                LRESULT(0)
            }

            WM_DESTROY => {
                let _ = KillTimer(Some(hwnd), TIMER_CLIPBOARD_RETRY);
                let _ = RemoveClipboardFormatListener(hwnd);
                LRESULT(0)
            }

            WM_CLIPBOARDUPDATE => {
                begin_read(hwnd);
                LRESULT(0)
            }

            WM_TIMER if wparam.0 == TIMER_CLIPBOARD_RETRY => {
                step_read(hwnd);
                LRESULT(0)
            }

            // System tray icon messages
            msg if msg == tray::WM_TRAYICON => {
                let event = lparam.0 as u32;
                if event == 0x0205 {
                    // Right-click: show context menu
                    tray::show_tray_menu(hwnd);
                }
                LRESULT(0)
            }

            // Context menu commands
            WM_COMMAND => {
                let cmd = (wparam.0 & 0xFFFF) as u32;
                if cmd == tray::MENU_EXIT {
                    PostQuitMessage(0);
                }
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

/// A clipboard change arrived: start a fresh read. A change landing while a
/// previous retry sequence is pending replaces it; the event carries no
/// payload, so only the latest content is worth reading.
fn begin_read(hwnd: HWND) {
    STATE.with(|s| s.borrow_mut().read = Some(ReadInFlight::new()));
    step_read(hwnd);
}

fn step_read(hwnd: HWND) {
    let step = STATE.with(|s| {
        let mut state = s.borrow_mut();
        let read = state.read.as_mut()?;
        let mut clipboard = WinClipboard { owner: hwnd };
        Some(read.step(&mut clipboard))
    });

    match step {
        None => unsafe {
            let _ = KillTimer(Some(hwnd), TIMER_CLIPBOARD_RETRY);
        },
        Some(ReadStep::RetryAfter(delay)) => unsafe {
            // Re-arming the same timer id resets the countdown
            SetTimer(
                Some(hwnd),
                TIMER_CLIPBOARD_RETRY,
                delay.as_millis() as u32,
                None,
            );
        },
        Some(ReadStep::Done(text)) => {
            unsafe {
                let _ = KillTimer(Some(hwnd), TIMER_CLIPBOARD_RETRY);
            }
            STATE.with(|s| s.borrow_mut().read = None);
            deliver(text);
        }
    }
}

/// Read finished: run the text through the notifier and show the result.
fn deliver(text: Option<String>) {
    let notification = STATE.with(|s| {
        s.borrow_mut()
            .notifier
            .clipboard_text_arrived(text.as_deref())
    });
    if let Some(notification) = notification {
        log::debug!("clipboard changed: {}", notification.label);
        popup::show_notification(&notification);
    }
}

/// Real clipboard behind the [`ClipboardAccess`] seam.
///
/// `OpenClipboard` failing means another process holds the clipboard right
/// now, the classic transient race after a copy. Everything else that goes
/// wrong mid-read is reported as a read failure; both are retried upstream.
struct WinClipboard {
    owner: HWND,
}

impl ClipboardAccess for WinClipboard {
    fn read_text(&mut self) -> Result<Option<String>, ClipboardError> {
        unsafe {
            OpenClipboard(Some(self.owner)).map_err(|_| ClipboardError::Busy)?;
            let _close = CloseClipboardOnDrop;

            if IsClipboardFormatAvailable(CF_UNICODETEXT).is_err() {
                return Ok(None);
            }

            let handle: HANDLE = GetClipboardData(CF_UNICODETEXT)
                .map_err(|e| ClipboardError::Read(e.message()))?;
            let hglobal = HGLOBAL(handle.0);

            let ptr = GlobalLock(hglobal) as *const u16;
            if ptr.is_null() {
                return Err(ClipboardError::Read("GlobalLock returned null".into()));
            }

            let mut len = 0usize;
            while *ptr.add(len) != 0 {
                len += 1;
            }
            let text = String::from_utf16_lossy(std::slice::from_raw_parts(ptr, len));

            let _ = GlobalUnlock(hglobal);
            Ok(Some(text))
        }
    }
}

// CloseClipboard must run on every exit path once OpenClipboard succeeded.
struct CloseClipboardOnDrop;

impl Drop for CloseClipboardOnDrop {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseClipboard();
        }
    }
}
