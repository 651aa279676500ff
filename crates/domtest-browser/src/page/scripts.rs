//! Page-side functions passed to `Runtime.callFunctionOn`.
//!
//! Each runs with `this` bound to an element or a document.

/// `this`: document. Args: strategy, value. Returns the first match or null.
pub(super) const FIND_ELEMENT: &str = r#"function(strategy, value) {
    switch (strategy) {
        case 'id': return this.getElementById(value);
        case 'name': return this.getElementsByName(value)[0] || null;
        case 'css': return this.querySelector(value);
        case 'class': return this.getElementsByClassName(value)[0] || null;
        case 'tag': return this.getElementsByTagName(value)[0] || null;
        case 'xpath':
            return this.evaluate(value, this, null, 9, null).singleNodeValue;
        default: throw new Error('unknown strategy: ' + strategy);
    }
}"#;

/// `this`: element. Returns `{tag, type, editable}`.
pub(super) const DESCRIBE: &str = r#"function() {
    return {
        tag: this.tagName.toLowerCase(),
        type: this.tagName === 'INPUT' ? String(this.type).toLowerCase() : null,
        editable: !!this.isContentEditable,
    };
}"#;

/// `this`: document. Arg: iframe index. Returns the iframe's document or null.
pub(super) const FRAME_DOCUMENT: &str = r#"function(index) {
    const frame = this.getElementsByTagName('iframe')[index];
    return frame ? frame.contentDocument : null;
}"#;

/// `this`: document.
pub(super) const FRAME_COUNT: &str = r#"function() {
    return this.getElementsByTagName('iframe').length;
}"#;

/// `this`: document.
pub(super) const OUTER_HTML: &str = r#"function() {
    return this.documentElement ? this.documentElement.outerHTML : '';
}"#;

/// `this`: element. Empties a form control or editable region.
pub(super) const CLEAR: &str = r#"function() {
    if ('value' in this) {
        this.value = '';
    } else if (this.isContentEditable) {
        this.textContent = '';
    }
    this.dispatchEvent(new Event('input', { bubbles: true }));
    this.dispatchEvent(new Event('change', { bubbles: true }));
}"#;

/// `this`: element.
pub(super) const CLICK: &str = r#"function() { this.click(); }"#;

/// `this`: select element. Arg: choice. Returns whether an option matched.
pub(super) const SELECT_OPTION: &str = r#"function(choice) {
    for (const option of this.options) {
        if (option.value === choice || option.label === choice || option.text.trim() === choice) {
            this.value = option.value;
            this.dispatchEvent(new Event('input', { bubbles: true }));
            this.dispatchEvent(new Event('change', { bubbles: true }));
            return true;
        }
    }
    return false;
}"#;

/// `this`: element. Rendered, not hidden and not fully transparent.
pub(super) const IS_VISIBLE: &str = r#"function() {
    if (!this.isConnected) return false;
    const style = this.ownerDocument.defaultView.getComputedStyle(this);
    if (style.display === 'none' || style.visibility === 'hidden' || style.opacity === '0') {
        return false;
    }
    const rect = this.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
}"#;
