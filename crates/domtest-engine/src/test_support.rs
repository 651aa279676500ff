//! In-memory [`BrowserPage`] for engine tests.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use domtest_browser::{BrowserError, BrowserPage, ElementHandle, Locator};
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Top,
    Iframe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IframeKind {
    None,
    Accessible,
    Inaccessible,
}

#[derive(Debug, Clone, Copy)]
enum NavFailure {
    Page,
    SessionLost,
}

/// A scripted element.
#[derive(Debug, Clone)]
pub struct MockElement {
    locator: Locator,
    context: Context,
    handle: ElementHandle,
    visible: bool,
    appears_after: usize,
    revealed_by: Option<String>,
}

impl MockElement {
    pub fn top(locator: Locator, handle: ElementHandle) -> Self {
        Self {
            locator,
            context: Context::Top,
            handle,
            visible: true,
            appears_after: 0,
            revealed_by: None,
        }
    }

    pub fn in_iframe(locator: Locator, handle: ElementHandle) -> Self {
        Self {
            context: Context::Iframe,
            ..Self::top(locator, handle)
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Missing for the first `probes` lookups in its context.
    pub fn appears_after(mut self, probes: usize) -> Self {
        self.appears_after = probes;
        self
    }

    /// Hidden until the element with `object_id` is clicked.
    pub fn revealed_by_click(mut self, object_id: &str) -> Self {
        self.visible = false;
        self.revealed_by = Some(object_id.to_string());
        self
    }
}

struct MockState {
    elements: Vec<MockElement>,
    iframe: IframeKind,
    in_frame: bool,
    probes: HashMap<String, usize>,
    actions: Vec<String>,
    typed: HashMap<String, String>,
    navigations: usize,
    nav_failures: HashMap<usize, NavFailure>,
    lookup_errors: HashSet<String>,
}

pub struct MockPage {
    state: Mutex<MockState>,
}

impl MockPage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                elements: Vec::new(),
                iframe: IframeKind::None,
                in_frame: false,
                probes: HashMap::new(),
                actions: Vec::new(),
                typed: HashMap::new(),
                navigations: 0,
                nav_failures: HashMap::new(),
                lookup_errors: HashSet::new(),
            }),
        }
    }

    pub fn with_iframe(self) -> Self {
        self.state.lock().iframe = IframeKind::Accessible;
        self
    }

    pub fn with_inaccessible_iframe(self) -> Self {
        self.state.lock().iframe = IframeKind::Inaccessible;
        self
    }

    pub fn with(self, element: MockElement) -> Self {
        self.state.lock().elements.push(element);
        self
    }

    /// The `n`th navigation (0-based) fails with a page-level error.
    pub fn fail_navigation(self, n: usize) -> Self {
        self.state.lock().nav_failures.insert(n, NavFailure::Page);
        self
    }

    /// The `n`th navigation (0-based) finds the browser gone.
    pub fn lose_session_on_navigation(self, n: usize) -> Self {
        self.state.lock().nav_failures.insert(n, NavFailure::SessionLost);
        self
    }

    /// Lookups with `locator` raise a script error.
    pub fn fail_lookup(self, locator: &Locator) -> Self {
        self.state.lock().lookup_errors.insert(locator.to_string());
        self
    }

    pub fn in_frame(&self) -> bool {
        self.state.lock().in_frame
    }

    pub fn actions(&self) -> Vec<String> {
        self.state.lock().actions.clone()
    }

    pub fn navigations(&self) -> usize {
        self.state.lock().navigations
    }

    /// Text currently in the field with `object_id`.
    pub fn typed(&self, object_id: &str) -> Option<String> {
        self.state.lock().typed.get(object_id).cloned()
    }

    /// Total lookups for `locator` across contexts.
    pub fn probes(&self, locator: &Locator) -> usize {
        let suffix = format!(":{}", locator);
        self.state
            .lock()
            .probes
            .iter()
            .filter(|(k, _)| k.ends_with(&suffix))
            .map(|(_, v)| *v)
            .sum()
    }
}

impl MockState {
    fn context(&self) -> Context {
        if self.in_frame { Context::Iframe } else { Context::Top }
    }

    fn element(&self, object_id: &str) -> Option<&MockElement> {
        self.elements.iter().find(|e| e.handle.object_id == object_id)
    }
}

#[async_trait]
impl BrowserPage for MockPage {
    async fn navigate(&self, _url: &str) -> Result<(), BrowserError> {
        let mut st = self.state.lock();
        let index = st.navigations;
        st.navigations += 1;
        st.in_frame = false;
        st.actions.push("navigate".to_string());

        match st.nav_failures.get(&index) {
            Some(NavFailure::Page) => Err(BrowserError::NavigationFailed(
                "net::ERR_CONNECTION_REFUSED".to_string(),
            )),
            Some(NavFailure::SessionLost) => Err(BrowserError::NotConnected),
            None => Ok(()),
        }
    }

    async fn page_source(&self) -> Result<String, BrowserError> {
        Ok("<html><body>mock</body></html>".to_string())
    }

    async fn screenshot_png(&self) -> Result<Vec<u8>, BrowserError> {
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn frame_count(&self) -> Result<usize, BrowserError> {
        let st = self.state.lock();
        Ok(match (st.in_frame, st.iframe) {
            (false, IframeKind::Accessible | IframeKind::Inaccessible) => 1,
            _ => 0,
        })
    }

    async fn switch_to_frame(&self, index: usize) -> Result<(), BrowserError> {
        let mut st = self.state.lock();
        if index == 0 && !st.in_frame && st.iframe == IframeKind::Accessible {
            st.in_frame = true;
            Ok(())
        } else {
            Err(BrowserError::FrameUnavailable(index))
        }
    }

    fn switch_to_default_content(&self) {
        self.state.lock().in_frame = false;
    }

    async fn find_element(&self, locator: &Locator) -> Result<Option<ElementHandle>, BrowserError> {
        let mut st = self.state.lock();
        if st.lookup_errors.contains(&locator.to_string()) {
            return Err(BrowserError::Script(format!("invalid selector: {}", locator)));
        }

        let context = st.context();
        let count = {
            let entry = st.probes.entry(format!("{:?}:{}", context, locator)).or_insert(0);
            *entry += 1;
            *entry
        };

        Ok(st
            .elements
            .iter()
            .find(|e| e.context == context && &e.locator == locator && count > e.appears_after)
            .map(|e| e.handle.clone()))
    }

    async fn clear(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        let mut st = self.state.lock();
        st.actions.push(format!("clear:{}", element.object_id));
        st.typed.insert(element.object_id.clone(), String::new());
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> Result<(), BrowserError> {
        let mut st = self.state.lock();
        st.actions.push(format!("type:{}:{}", element.object_id, text));
        st.typed
            .entry(element.object_id.clone())
            .or_default()
            .push_str(text);
        Ok(())
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), BrowserError> {
        let mut st = self.state.lock();
        st.actions.push(format!("click:{}", element.object_id));
        for e in st.elements.iter_mut() {
            if e.revealed_by.as_deref() == Some(element.object_id.as_str()) {
                e.visible = true;
            }
        }
        Ok(())
    }

    async fn select_option(&self, element: &ElementHandle, choice: &str) -> Result<(), BrowserError> {
        let mut st = self.state.lock();
        st.actions.push(format!("select:{}:{}", element.object_id, choice));
        Ok(())
    }

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, BrowserError> {
        let st = self.state.lock();
        st.element(&element.object_id)
            .map(|e| e.visible)
            .ok_or_else(|| BrowserError::Detached(element.object_id.clone()))
    }
}
