//! Integration tests against a real Chrome.
//!
//! Ignored by default. Run with:
//! cargo test -p domtest-browser --test integration_test -- --ignored --nocapture

use std::time::Duration;

use domtest_browser::{BrowserManager, BrowserManagerConfig, BrowserPage, Locator};

const LOGIN_PAGE: &str = "data:text/html,\
<form>\
<input id='user' name='user' type='text'>\
<input id='pass' type='password'>\
<input id='when' type='datetime'>\
<select id='role'><option value='a'>Admin</option><option value='u'>User</option></select>\
<button id='go' type='button' onclick=\"document.getElementById('msg').style.display='block'\">Go</button>\
</form>\
<div id='msg' class='alert-success' style='display:none'>Welcome</div>\
<iframe srcdoc=\"<input id='inner' type='text'>\"></iframe>";

fn test_config() -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: 9333,
        profile_dir: Some(std::path::PathBuf::from("/tmp/domtest-test-profile")),
        headless: true,
        launch_timeout: Duration::from_secs(10),
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_chrome_detection() {
    let path = BrowserManager::find_chrome().expect("Chrome should be installed");
    assert!(path.exists());
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_fill_click_and_visibility() {
    let manager = BrowserManager::new(test_config());
    let page = manager.open_page(LOGIN_PAGE).await.expect("open page");
    page.navigate(LOGIN_PAGE).await.expect("navigate");

    let user = page
        .find_element(&Locator::Id("user".into()))
        .await
        .unwrap()
        .expect("user field");
    assert_eq!(user.tag_name, "input");
    assert_eq!(user.input_type.as_deref(), Some("text"));

    // Obsolete input types render as text fields and are reported as such.
    let when = page
        .find_element(&Locator::Id("when".into()))
        .await
        .unwrap()
        .expect("when field");
    assert_eq!(when.input_type.as_deref(), Some("text"));

    page.clear(&user).await.unwrap();
    page.send_keys(&user, "alice").await.unwrap();

    let msg = page
        .find_element(&Locator::ClassName("alert-success".into()))
        .await
        .unwrap()
        .expect("message");
    assert!(!page.is_displayed(&msg).await.unwrap());

    let go = page
        .find_element(&Locator::XPath("//button[@id='go']".into()))
        .await
        .unwrap()
        .expect("button");
    page.click(&go).await.unwrap();
    assert!(page.is_displayed(&msg).await.unwrap());

    let role = page
        .find_element(&Locator::Css("#role".into()))
        .await
        .unwrap()
        .expect("select");
    page.select_option(&role, "User").await.unwrap();
    assert!(page.select_option(&role, "Guest").await.is_err());

    manager.close_page(&page).await.unwrap();
    manager.shutdown().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_frame_switching() {
    let manager = BrowserManager::new(test_config());
    let page = manager.open_page(LOGIN_PAGE).await.expect("open page");
    page.navigate(LOGIN_PAGE).await.expect("navigate");

    assert_eq!(page.frame_count().await.unwrap(), 1);
    assert!(page.find_element(&Locator::Id("inner".into())).await.unwrap().is_none());

    page.switch_to_frame(0).await.unwrap();
    assert!(page.find_element(&Locator::Id("inner".into())).await.unwrap().is_some());
    assert!(page.find_element(&Locator::Id("user".into())).await.unwrap().is_none());

    page.switch_to_default_content();
    assert!(page.find_element(&Locator::Id("user".into())).await.unwrap().is_some());
    assert!(page.switch_to_frame(3).await.is_err());

    manager.shutdown().await.unwrap();
}
