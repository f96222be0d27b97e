// Gallery picker for photos attached to sightings.
//
// On Android this calls into MainActivity over JNI and polls for the result.
// Other platforms have no native picker; there the user types a file path.

use crate::error::AppError;
use std::path::PathBuf;
use submission_form::PickResult;

#[cfg(target_os = "android")]
use jni::objects::{JClass, JObject, JString, JValue};
#[cfg(target_os = "android")]
use ndk_context::android_context;

#[cfg(target_os = "android")]
const MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

/// Turns a typed path into a pick result; blank input counts as canceled
pub fn pick_from_path(input: &str) -> PickResult {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        PickResult::Canceled
    } else {
        PickResult::Picked(vec![PathBuf::from(trimmed)])
    }
}

#[cfg(target_os = "android")]
fn jni_error(context: &str) -> impl Fn(jni::errors::Error) -> AppError + '_ {
    move |e| AppError::PermissionDenied(format!("{}: {}", context, e))
}

#[cfg(target_os = "android")]
fn get_app_class_loader<'a>(env: &mut jni::JNIEnv<'a>) -> Result<JObject<'a>, AppError> {
    let at_cls = env
        .find_class("android/app/ActivityThread")
        .map_err(jni_error("ActivityThread not found"))?;
    let at = env
        .call_static_method(
            &at_cls,
            "currentActivityThread",
            "()Landroid/app/ActivityThread;",
            &[],
        )
        .and_then(|v| v.l())
        .map_err(jni_error("currentActivityThread failed"))?;

    let app = env
        .call_method(&at, "getApplication", "()Landroid/app/Application;", &[])
        .and_then(|v| v.l())
        .map_err(jni_error("getApplication failed"))?;

    env.call_method(&app, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
        .and_then(|v| v.l())
        .map_err(jni_error("getClassLoader failed"))
}

#[cfg(target_os = "android")]
fn get_activity_instance<'a>(
    env: &mut jni::JNIEnv<'a>,
) -> Result<(JObject<'a>, JClass<'a>), AppError> {
    let loader = get_app_class_loader(env)?;

    // ClassLoader.loadClass wants dots, JNI signatures want slashes
    let name: JString = env
        .new_string(MAIN_ACTIVITY_CLASS.replace('/', "."))
        .map_err(jni_error("new_string failed"))?;
    let cls = env
        .call_method(
            &loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&JObject::from(name))],
        )
        .and_then(|v| v.l())
        .map(JClass::from)
        .map_err(jni_error("ClassLoader.loadClass failed"))?;

    let signature = format!("()L{};", MAIN_ACTIVITY_CLASS);
    let instance = match env.call_static_method(&cls, "getInstance", &signature, &[]) {
        Ok(val) => val.l().map_err(jni_error("getInstance() invalid"))?,
        Err(_) => {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_clear();
            }

            let comp_signature = format!("L{}$Companion;", MAIN_ACTIVITY_CLASS);
            let companion = env
                .get_static_field(&cls, "Companion", &comp_signature)
                .and_then(|v| v.l())
                .map_err(jni_error("Companion field missing"))?;

            env.call_method(&companion, "getInstance", &signature, &[])
                .and_then(|v| v.l())
                .map_err(jni_error("Companion.getInstance() failed"))?
        }
    };

    if instance.is_null() {
        return Err(AppError::PermissionDenied(
            "MainActivity instance is null".to_string(),
        ));
    }

    Ok((instance, cls))
}

#[cfg(target_os = "android")]
fn poll_string(
    env: &mut jni::JNIEnv,
    cls: &JClass,
    method: &str,
) -> Result<Option<String>, AppError> {
    let obj = match env
        .call_static_method(cls, method, "()Ljava/lang/String;", &[])
        .and_then(|v| v.l())
    {
        Ok(obj) if !obj.is_null() => obj,
        _ => return Ok(None),
    };

    let value: String = env
        .get_string((&obj).into())
        .map_err(jni_error("String conversion failed"))?
        .into();
    Ok(Some(value))
}

/// Opens the gallery and waits up to 60 seconds for a selection
#[cfg(target_os = "android")]
pub fn pick_image() -> Result<PickResult, AppError> {
    let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
    let vm = unsafe { jni::JavaVM::from_raw(vm_ptr) }.map_err(jni_error("JavaVM failed"))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(jni_error("JNI attach failed"))?;

    let (activity, main_cls) = get_activity_instance(&mut env)?;

    env.call_static_method(&main_cls, "clearLastError", "()V", &[])
        .map_err(jni_error("clearLastError failed"))?;
    env.call_method(&activity, "launchImagePicker", "()V", &[])
        .map_err(jni_error("launchImagePicker failed"))?;

    for _ in 0..600 {
        std::thread::sleep(std::time::Duration::from_millis(100));

        if let Some(path) = poll_string(&mut env, &main_cls, "getLastPhotoPath")? {
            log::debug!("Picked image {}", path);
            return Ok(PickResult::Picked(vec![PathBuf::from(path)]));
        }

        if let Some(err) = poll_string(&mut env, &main_cls, "getLastError")? {
            if err.to_lowercase().contains("cancel") {
                return Ok(PickResult::Canceled);
            }
            return Err(AppError::PermissionDenied(err));
        }
    }

    log::warn!("Image picker timed out without a selection");
    Ok(PickResult::Canceled)
}

#[cfg(not(target_os = "android"))]
pub fn pick_image() -> Result<PickResult, AppError> {
    Err(AppError::Other(
        "Seletor de imagens disponível apenas no Android".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_from_path() {
        assert_eq!(pick_from_path("   "), PickResult::Canceled);
        assert_eq!(
            pick_from_path(" /sdcard/DCIM/arara.jpg "),
            PickResult::Picked(vec![PathBuf::from("/sdcard/DCIM/arara.jpg")])
        );
    }

    #[cfg(not(target_os = "android"))]
    #[test]
    fn test_no_native_picker() {
        assert!(matches!(pick_image(), Err(AppError::Other(_))));
    }
}
