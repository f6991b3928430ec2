//! macOS 前台窗口追踪与粘贴按键合成
//!
//! 唤醒主窗口前记下前台窗口，粘贴时通过 Accessibility API 把它带回前台

use accessibility::{AXAttribute, AXUIElement};
use accessibility_sys::{
    kAXFocusedWindowAttribute, kAXRaiseAction, kAXWindowsAttribute, AXError,
    AXUIElementCopyAttributeValues, AXUIElementCreateApplication, AXUIElementPerformAction,
    AXUIElementRef,
};
use anyhow::Result;
use cocoa::{
    appkit::NSApplicationActivationOptions::NSApplicationActivateIgnoringOtherApps,
    base::{id, nil},
    foundation::NSAutoreleasePool,
};
use core_foundation::{
    array::{CFArrayGetCount, CFArrayGetValueAtIndex},
    base::TCFType,
    string::CFString,
};
use core_graphics::display::CGWindowID;
use enigo::{
    Direction::{Click, Press, Release},
    Enigo, Key, Keyboard, Settings,
};
use log::{info, warn};
use objc::{msg_send, runtime::Class, sel, sel_impl};
use std::{thread, time::Duration};

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn _AXUIElementGetWindow(el: AXUIElementRef, id: &mut CGWindowID) -> AXError;
}

/// 前台窗口标识
#[derive(Debug, Clone)]
pub struct WindowInfo {
    app_pid: i32,
    window_id: u32,
}

/// 获取当前前台应用的聚焦窗口
pub fn get_active_window_info() -> Option<WindowInfo> {
    unsafe {
        let _pool = NSAutoreleasePool::new(nil);
        let workspace_class = Class::get("NSWorkspace")?;
        let workspace: id = msg_send![workspace_class, sharedWorkspace];
        let active_app: id = msg_send![workspace, frontmostApplication];
        if active_app == nil {
            warn!("No active app found");
            return None;
        }

        let app_pid: i32 = msg_send![active_app, processIdentifier];
        let app_element = AXUIElement::application(app_pid);
        let Some(focused_window) = app_element
            .attribute(&AXAttribute::new(&CFString::from_static_string(
                kAXFocusedWindowAttribute,
            )))
            .map(|el| el.downcast_into::<AXUIElement>())
            .ok()
            .flatten()
        else {
            warn!("Failed to get focused window");
            return None;
        };

        let mut window_id: u32 = 0;
        _AXUIElementGetWindow(focused_window.as_concrete_TypeRef(), &mut window_id);
        info!("Active app pid: {}, window id: {}", app_pid, window_id);
        Some(WindowInfo { app_pid, window_id })
    }
}

/// 激活记录的窗口
pub fn activate_window(window_info: &WindowInfo) {
    unsafe {
        let _pool = NSAutoreleasePool::new(nil);
        let Some(running_app_class) = Class::get("NSRunningApplication") else {
            return;
        };
        let app: id = msg_send![
            running_app_class,
            runningApplicationWithProcessIdentifier: window_info.app_pid
        ];
        if app == nil {
            warn!("Failed to get the running application");
            return;
        }
        let _: () = msg_send![app, activateWithOptions: NSApplicationActivateIgnoringOtherApps];

        let app_element = AXUIElementCreateApplication(window_info.app_pid);
        let mut window_list_ref = std::ptr::null();
        AXUIElementCopyAttributeValues(
            app_element,
            CFString::new(kAXWindowsAttribute).as_concrete_TypeRef(),
            0,
            9999999,
            &mut window_list_ref,
        );
        if window_list_ref.is_null() {
            warn!("Failed to get window list");
            return;
        }

        let window_count = CFArrayGetCount(window_list_ref);
        if window_count == 0 {
            warn!("No matched window found");
            return;
        }
        for i in 0..window_count {
            let mut window_id: u32 = 0;
            let window_ref = CFArrayGetValueAtIndex(window_list_ref, i as isize) as AXUIElementRef;
            _AXUIElementGetWindow(window_ref, &mut window_id);

            if window_id == window_info.window_id {
                AXUIElementPerformAction(
                    window_ref,
                    CFString::new(kAXRaiseAction).as_concrete_TypeRef(),
                );
                break;
            }
        }
    }
}

/// 发送 Cmd+V 粘贴按键
///
/// 按下与点击之间留出间隔，等待目标窗口完成聚焦
pub fn paste() -> Result<()> {
    let mut enigo =
        Enigo::new(&Settings::default()).map_err(|e| anyhow::anyhow!("Failed to init enigo: {}", e))?;
    enigo.key(Key::Meta, Press)?;
    thread::sleep(Duration::from_millis(100));
    enigo.key(Key::Unicode('v'), Click)?;
    thread::sleep(Duration::from_millis(370));
    enigo.key(Key::Meta, Release)?;
    Ok(())
}
