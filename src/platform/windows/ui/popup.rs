//! The word-count popup window.
//!
//! A layered `WS_EX_NOACTIVATE` tool window rendered with Direct2D for
//! high-quality anti-aliased rounded corners and per-pixel alpha via
//! UpdateLayeredWindow. Shown without activation so the user's focus never
//! moves, resized to its label on every notification, and hidden again by
//! a single-shot timer.

use std::cell::RefCell;

use windows::core::{w, BOOL, PCWSTR};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, POINT, RECT, SIZE, WPARAM};
use windows::Win32::Graphics::Direct2D::Common::{
    D2D1_ALPHA_MODE_PREMULTIPLIED, D2D1_COLOR_F, D2D1_PIXEL_FORMAT, D2D_RECT_F,
};
use windows::Win32::Graphics::Direct2D::{
    D2D1CreateFactory, ID2D1DCRenderTarget, ID2D1Factory, ID2D1RenderTarget,
    D2D1_ANTIALIAS_MODE_PER_PRIMITIVE, D2D1_DRAW_TEXT_OPTIONS_NONE, D2D1_FACTORY_TYPE_SINGLE_THREADED,
    D2D1_RENDER_TARGET_PROPERTIES, D2D1_RENDER_TARGET_TYPE_DEFAULT, D2D1_RENDER_TARGET_USAGE_NONE,
    D2D1_ROUNDED_RECT,
};
use windows::Win32::Graphics::DirectWrite::{
    DWriteCreateFactory, IDWriteFactory, IDWriteFontCollection, IDWriteTextFormat,
    IDWriteTextLayout, DWRITE_FACTORY_TYPE_SHARED, DWRITE_FONT_STRETCH_NORMAL,
    DWRITE_FONT_STYLE_NORMAL, DWRITE_FONT_WEIGHT_BOLD, DWRITE_TEXT_METRICS,
};
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_B8G8R8A8_UNORM;
use windows::Win32::Graphics::Gdi::{
    CreateCompatibleDC, CreateDIBSection, DeleteDC, DeleteObject, GetDC, ReleaseDC, SelectObject,
    BITMAPINFO, BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, KillTimer, RegisterClassW, SetTimer, SetWindowPos, ShowWindow,
    SystemParametersInfoW, UpdateLayeredWindow, HWND_TOPMOST, SPI_GETWORKAREA, SWP_NOACTIVATE,
    SWP_NOMOVE, SWP_NOSIZE, SW_HIDE, SW_SHOWNOACTIVATE, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
    ULW_ALPHA, WM_DESTROY, WM_MOUSEACTIVATE, WM_TIMER, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE,
    WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};
use windows_numerics::Vector2;

use crate::model::constants::{
    AUTO_HIDE_MS, BORDER_WIDTH, CORNER_RADIUS, FONT_FALLBACK, FONT_SIZE_DIP, PADDING_PX,
};
use crate::model::popup_state::popup_origin;
use crate::model::theme::ThemeSnapshot;
use crate::notifier::Notification;
use crate::platform::windows::app::STATE;
use crate::platform::windows::theme;

/// Timer that hides the popup after the auto-hide interval.
pub const TIMER_POPUP_HIDE: usize = 2;

// MA_NOACTIVATE: show me, but do not take focus for it
const MA_NOACTIVATE: isize = 3;

thread_local! {
    static D2D_FACTORY: RefCell<Option<ID2D1Factory>> = const { RefCell::new(None) };
    static DWRITE_FACTORY: RefCell<Option<IDWriteFactory>> = const { RefCell::new(None) };
    static TEXT_FORMAT: RefCell<Option<IDWriteTextFormat>> = const { RefCell::new(None) };
}

/// Create the Direct2D/DirectWrite factories and the label text format.
pub fn init_graphics(theme_snapshot: &ThemeSnapshot) -> windows::core::Result<()> {
    unsafe {
        let factory: ID2D1Factory = D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None)?;
        D2D_FACTORY.with(|f| *f.borrow_mut() = Some(factory));

        let dwrite_factory: IDWriteFactory = DWriteCreateFactory(DWRITE_FACTORY_TYPE_SHARED)?;

        if let Some(format) = create_label_format(&dwrite_factory, &theme_snapshot.font_family) {
            TEXT_FORMAT.with(|f| *f.borrow_mut() = Some(format));
        }

        DWRITE_FACTORY.with(|f| *f.borrow_mut() = Some(dwrite_factory));
        Ok(())
    }
}

/// Drop the cached factories at teardown.
pub fn release_graphics() {
    TEXT_FORMAT.with(|f| *f.borrow_mut() = None);
    DWRITE_FACTORY.with(|f| *f.borrow_mut() = None);
    D2D_FACTORY.with(|f| *f.borrow_mut() = None);
}

/// Create the popup window, hidden. One instance for the process lifetime.
pub fn create_popup_window(theme_snapshot: &ThemeSnapshot) -> windows::core::Result<HWND> {
    unsafe {
        let instance = GetModuleHandleW(None)?;
        let class_name = w!("WordToastPopup");

        let wc = WNDCLASSW {
            lpfnWndProc: Some(popup_wndproc),
            hInstance: instance.into(),
            lpszClassName: class_name,
            ..Default::default()
        };
        RegisterClassW(&wc);

        // Layered for per-pixel alpha, topmost, and crucially NOACTIVATE:
        // showing the popup must never move the user's focus. TOOLWINDOW
        // keeps it out of the taskbar and Alt-Tab.
        let ex_style = WS_EX_LAYERED | WS_EX_TOPMOST | WS_EX_NOACTIVATE | WS_EX_TOOLWINDOW;

        let hwnd = CreateWindowExW(
            ex_style,
            class_name,
            w!("WordToast"),
            WS_POPUP,
            0,
            0,
            0,
            0,
            None,
            None,
            Some(instance.into()),
            None,
        )?;

        // Windows 11 chrome hints; no-ops on older builds
        theme::try_apply_dark_mode(hwnd, !theme_snapshot.is_light());
        theme::try_apply_rounded_corners(hwnd);

        Ok(hwnd)
    }
}

extern "system" fn popup_wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe {
        match msg {
            WM_TIMER if wparam.0 == TIMER_POPUP_HIDE => {
                let _ = KillTimer(Some(hwnd), TIMER_POPUP_HIDE);
                hide_if_expired(hwnd);
                LRESULT(0)
            }

            // Never activate, even on a stray click
            WM_MOUSEACTIVATE => LRESULT(MA_NOACTIVATE),

            WM_DESTROY => {
                let _ = KillTimer(Some(hwnd), TIMER_POPUP_HIDE);
                LRESULT(0)
            }

            _ => DefWindowProcW(hwnd, msg, wparam, lparam),
        }
    }
}

fn hide_if_expired(hwnd: HWND) {
    let expired = STATE.with(|s| {
        let mut state = s.borrow_mut();
        match state.hide_token.take() {
            Some(token) => state.notifier.hide_expired(token),
            None => false,
        }
    });
    if expired {
        unsafe {
            let _ = ShowWindow(hwnd, SW_HIDE);
        }
    }
}

/// Show (or refresh) the popup for a notification.
///
/// Measures the label, resizes the window around it, re-anchors it to the
/// bottom-right corner of the primary work area, repaints, and restarts
/// the auto-hide timer. When the popup is already visible this replaces
/// its content in place; there is no hide/show cycle to flicker.
pub fn show_notification(notification: &Notification) {
    let (hwnd, theme_snapshot) = STATE.with(|s| {
        let mut state = s.borrow_mut();
        state.hide_token = Some(notification.hide_token);
        (state.popup_hwnd, state.theme.clone())
    });
    if hwnd.is_invalid() {
        return;
    }

    unsafe {
        let Some(layout) = create_label_layout(&notification.label) else {
            log::warn!("text layout unavailable; dropping notification");
            return;
        };

        let mut metrics = DWRITE_TEXT_METRICS::default();
        if layout.GetMetrics(&mut metrics).is_err() {
            return;
        }

        let width = metrics.width.ceil() as i32 + 2 * PADDING_PX;
        let height = metrics.height.ceil() as i32 + 2 * PADDING_PX;

        // Primary work area (excludes the taskbar); recomputed every call
        // so text-driven resizes stay anchored to the corner
        let mut work_area = RECT::default();
        let _ = SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(&mut work_area as *mut RECT as *mut _),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        );
        let (x, y) = popup_origin(work_area.right, work_area.bottom, width, height);

        render_popup(hwnd, &layout, &theme_snapshot, x, y, width, height);

        let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
        let _ = SetWindowPos(
            hwnd,
            Some(HWND_TOPMOST),
            0,
            0,
            0,
            0,
            SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
        );

        // Re-arming the same timer id cancels the pending hide, so rapid
        // notifications keep the popup continuously visible
        SetTimer(Some(hwnd), TIMER_POPUP_HIDE, AUTO_HIDE_MS, None);
    }
}

/// Lay the label out with the cached text format.
unsafe fn create_label_layout(label: &str) -> Option<IDWriteTextLayout> {
    DWRITE_FACTORY.with(|df| {
        TEXT_FORMAT.with(|tf| {
            let dwrite = df.borrow();
            let format = tf.borrow();
            let (dwrite, format) = (dwrite.as_ref()?, format.as_ref()?);
            let label_wide: Vec<u16> = label.encode_utf16().collect();
            dwrite
                .CreateTextLayout(&label_wide, format, 4096.0, 4096.0)
                .ok()
        })
    })
}

/// Bold text format in the requested family, falling back to Segoe UI when
/// the family is not installed.
unsafe fn create_label_format(
    dwrite_factory: &IDWriteFactory,
    family: &str,
) -> Option<IDWriteTextFormat> {
    let family = if font_family_exists(dwrite_factory, family) {
        family
    } else {
        FONT_FALLBACK
    };
    let family_wide: Vec<u16> = family.encode_utf16().chain(std::iter::once(0)).collect();

    dwrite_factory
        .CreateTextFormat(
            PCWSTR(family_wide.as_ptr()),
            None,
            DWRITE_FONT_WEIGHT_BOLD,
            DWRITE_FONT_STYLE_NORMAL,
            DWRITE_FONT_STRETCH_NORMAL,
            FONT_SIZE_DIP,
            w!("en-us"),
        )
        .ok()
}

unsafe fn font_family_exists(dwrite_factory: &IDWriteFactory, family: &str) -> bool {
    let mut font_collection: Option<IDWriteFontCollection> = None;
    if dwrite_factory
        .GetSystemFontCollection(&mut font_collection, false)
        .is_err()
    {
        return false;
    }
    let Some(font_collection) = font_collection else {
        return false;
    };

    let family_wide: Vec<u16> = family.encode_utf16().chain(std::iter::once(0)).collect();
    let mut index: u32 = 0;
    let mut exists = BOOL::default();
    font_collection
        .FindFamilyName(PCWSTR(family_wide.as_ptr()), &mut index, &mut exists)
        .is_ok()
        && exists.as_bool()
}

fn color_f(rgb: crate::model::theme::Rgb) -> D2D1_COLOR_F {
    let (r, g, b) = rgb.to_f32();
    D2D1_COLOR_F { r, g, b, a: 1.0 }
}

/// Draw the rounded card and label with Direct2D, then hand the bitmap to
/// UpdateLayeredWindow, which also moves and resizes the window in the
/// same call.
unsafe fn render_popup(
    hwnd: HWND,
    layout: &IDWriteTextLayout,
    theme_snapshot: &ThemeSnapshot,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
) {
    // Create a compatible DC and ARGB bitmap
    let screen_dc = GetDC(None);
    let mem_dc = CreateCompatibleDC(Some(screen_dc));

    let bmi = BITMAPINFO {
        bmiHeader: BITMAPINFOHEADER {
            biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
            biWidth: width,
            biHeight: -height, // Top-down
            biPlanes: 1,
            biBitCount: 32,
            biCompression: BI_RGB.0,
            ..Default::default()
        },
        ..Default::default()
    };

    let mut bits: *mut std::ffi::c_void = std::ptr::null_mut();
    let bitmap = CreateDIBSection(Some(mem_dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0);

    if bitmap.is_err() || bits.is_null() {
        ReleaseDC(None, screen_dc);
        let _ = DeleteDC(mem_dc);
        return;
    }

    let bitmap = bitmap.unwrap();
    let old_bitmap = SelectObject(mem_dc, bitmap.into());

    let rt_props = D2D1_RENDER_TARGET_PROPERTIES {
        r#type: D2D1_RENDER_TARGET_TYPE_DEFAULT,
        pixelFormat: D2D1_PIXEL_FORMAT {
            format: DXGI_FORMAT_B8G8R8A8_UNORM,
            alphaMode: D2D1_ALPHA_MODE_PREMULTIPLIED,
        },
        dpiX: 96.0,
        dpiY: 96.0,
        usage: D2D1_RENDER_TARGET_USAGE_NONE,
        minLevel: Default::default(),
    };

    D2D_FACTORY.with(|f| {
        let factory = f.borrow();
        let Some(factory) = factory.as_ref() else {
            return;
        };

        let render_target: Result<ID2D1DCRenderTarget, _> = factory.CreateDCRenderTarget(&rt_props);

        if let Ok(dc_rt) = render_target {
            let rect = RECT {
                left: 0,
                top: 0,
                right: width,
                bottom: height,
            };

            if dc_rt.BindDC(mem_dc, &rect).is_ok() {
                let rt: ID2D1RenderTarget = dc_rt.into();

                rt.BeginDraw();

                // Clear to transparent; the rounded card supplies its own
                // opaque pixels and everything outside stays see-through
                rt.Clear(Some(&D2D1_COLOR_F {
                    r: 0.0,
                    g: 0.0,
                    b: 0.0,
                    a: 0.0,
                }));
                rt.SetAntialiasMode(D2D1_ANTIALIAS_MODE_PER_PRIMITIVE);

                // Inset by half the stroke so the border isn't clipped
                let inset = BORDER_WIDTH / 2.0;
                let card = D2D1_ROUNDED_RECT {
                    rect: D2D_RECT_F {
                        left: inset,
                        top: inset,
                        right: width as f32 - inset,
                        bottom: height as f32 - inset,
                    },
                    radiusX: CORNER_RADIUS,
                    radiusY: CORNER_RADIUS,
                };

                if let Ok(fill) = rt.CreateSolidColorBrush(&color_f(theme_snapshot.background), None)
                {
                    rt.FillRoundedRectangle(&card, &fill);
                }
                if let Ok(pen) = rt.CreateSolidColorBrush(&color_f(theme_snapshot.border), None) {
                    rt.DrawRoundedRectangle(&card, &pen, BORDER_WIDTH, None);
                }
                if let Ok(text) = rt.CreateSolidColorBrush(&color_f(theme_snapshot.foreground), None)
                {
                    rt.DrawTextLayout(
                        Vector2::new(PADDING_PX as f32, PADDING_PX as f32),
                        layout,
                        &text,
                        D2D1_DRAW_TEXT_OPTIONS_NONE,
                    );
                }

                let _ = rt.EndDraw(None, None);
            }
        }
    });

    // Apply to window: position, size and pixels in one call
    let pt_src = POINT { x: 0, y: 0 };
    let size = SIZE {
        cx: width,
        cy: height,
    };
    let pt_dst = POINT { x, y };

    let blend = windows::Win32::Graphics::Gdi::BLENDFUNCTION {
        BlendOp: 0,
        BlendFlags: 0,
        SourceConstantAlpha: 255,
        AlphaFormat: 1,
    };

    let _ = UpdateLayeredWindow(
        hwnd,
        Some(screen_dc),
        Some(&pt_dst),
        Some(&size),
        Some(mem_dc),
        Some(&pt_src),
        COLORREF(0),
        Some(&blend),
        ULW_ALPHA,
    );

    // Cleanup
    SelectObject(mem_dc, old_bitmap);
    let _ = DeleteObject(bitmap.into());
    let _ = DeleteDC(mem_dc);
    ReleaseDC(None, screen_dc);
}
