//! Materialises [`Mount`]s in the page.
//!
//! The node trees written last time are kept per mount so that the next
//! render patches attributes, styles and text in place. Elements are
//! recreated only when their tag or their listeners change.

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::Document;

use fluv_widgets::{
    runtime::msg::{Action, ActionPopup},
    view::{Element, Handler, Mount, Node, EMAIL_INPUT_ID},
};

thread_local! {
    static RENDERED: RefCell<HashMap<String, Vec<Node>>> = RefCell::new(HashMap::new());
}

pub fn apply(document: &Document, mounts: &[Mount], dispatch: fn(Action)) -> Result<(), JsValue> {
    mounts
        .iter()
        .try_for_each(|mount| apply_mount(document, mount, dispatch))
}

fn apply_mount(document: &Document, mount: &Mount, dispatch: fn(Action)) -> Result<(), JsValue> {
    match mount {
        Mount::Anchor {
            selector,
            display,
            children,
        } => {
            let anchor = match document.query_selector(selector)? {
                Some(anchor) => anchor,
                None => {
                    tracing::trace!(selector, "anchor not found");
                    return Ok(());
                }
            };
            if let Some(display) = display {
                if let Some(anchor) = anchor.dyn_ref::<web_sys::HtmlElement>() {
                    anchor.style().set_property("display", display)?;
                }
            }
            if let Some(children) = children {
                let previous = rendered(selector);
                match previous {
                    Some(previous) => {
                        patch_children(document, &anchor, &previous, children, dispatch)?
                    }
                    None => replace_children(document, &anchor, children, dispatch)?,
                };
                store(selector, children.to_owned());
            }
            Ok(())
        }
        Mount::Owned(element) => {
            let id = element.attribute("id").unwrap_or_default();
            let previous = rendered(id)
                .and_then(|previous| previous.into_iter().next())
                .zip(document.get_element_by_id(id));
            match previous {
                Some((previous, current)) => {
                    patch_node(document, &current, &previous, &Node::Element(element.to_owned()), dispatch)?
                }
                None => {
                    let body = document
                        .body()
                        .ok_or_else(|| JsValue::from_str("document has no body"))?;
                    let created = create_element(document, element, dispatch)?;
                    body.append_child(&created)?;
                }
            };
            store(id, vec![Node::Element(element.to_owned())]);
            Ok(())
        }
    }
}

fn rendered(key: &str) -> Option<Vec<Node>> {
    RENDERED.with(|rendered| rendered.borrow().get(key).cloned())
}

fn store(key: &str, nodes: Vec<Node>) {
    RENDERED.with(|rendered| {
        rendered.borrow_mut().insert(key.to_owned(), nodes);
    });
}

fn patch_node(
    document: &Document,
    current: &web_sys::Node,
    previous: &Node,
    next: &Node,
    dispatch: fn(Action),
) -> Result<(), JsValue> {
    if previous == next {
        return Ok(());
    }
    match (previous, next) {
        (Node::Element(previous), Node::Element(next))
            if previous.tag == next.tag && previous.handlers == next.handlers =>
        {
            let current = current
                .dyn_ref::<web_sys::Element>()
                .ok_or_else(|| JsValue::from_str("expected an element"))?;
            patch_attributes(current, previous, next)?;
            patch_children(document, current, &previous.children, &next.children, dispatch)
        }
        (Node::Text(_), Node::Text(text)) => {
            current.set_text_content(Some(text));
            Ok(())
        }
        (_, next) => {
            let replacement = create_node(document, next, dispatch)?;
            if let Some(parent) = current.parent_node() {
                parent.replace_child(&replacement, current)?;
            }
            Ok(())
        }
    }
}

fn patch_children(
    document: &Document,
    parent: &web_sys::Element,
    previous: &[Node],
    next: &[Node],
    dispatch: fn(Action),
) -> Result<(), JsValue> {
    let child_nodes = parent.child_nodes();
    if previous.len() != next.len() || child_nodes.length() as usize != previous.len() {
        return replace_children(document, parent, next, dispatch);
    }
    for (index, (previous_child, next_child)) in previous.iter().zip(next).enumerate() {
        match child_nodes.item(index as u32) {
            Some(current) => patch_node(document, &current, previous_child, next_child, dispatch)?,
            None => return replace_children(document, parent, next, dispatch),
        }
    }
    Ok(())
}

fn patch_attributes(
    current: &web_sys::Element,
    previous: &Element,
    next: &Element,
) -> Result<(), JsValue> {
    for (name, value) in &next.attributes {
        if previous.attribute(name) != Some(value.as_str()) {
            current.set_attribute(name, value)?;
        }
    }
    for (name, _) in &previous.attributes {
        if next.attribute(name).is_none() {
            current.remove_attribute(name)?;
        }
    }
    let style = next.style_text();
    if previous.style_text() != style {
        current.set_attribute("style", &style)?;
    }
    Ok(())
}

fn replace_children(
    document: &Document,
    parent: &web_sys::Element,
    children: &[Node],
    dispatch: fn(Action),
) -> Result<(), JsValue> {
    parent.set_text_content(None);
    children.iter().try_for_each(|child| {
        parent
            .append_child(&create_node(document, child, dispatch)?)
            .map(|_| ())
    })
}

fn create_node(document: &Document, node: &Node, dispatch: fn(Action)) -> Result<web_sys::Node, JsValue> {
    match node {
        Node::Element(element) => create_element(document, element, dispatch).map(Into::into),
        Node::Text(text) => Ok(document.create_text_node(text).into()),
    }
}

fn create_element(
    document: &Document,
    element: &Element,
    dispatch: fn(Action),
) -> Result<web_sys::Element, JsValue> {
    let node = document.create_element(element.tag)?;
    for (name, value) in &element.attributes {
        node.set_attribute(name, value)?;
    }
    if !element.styles.is_empty() {
        node.set_attribute("style", &element.style_text())?;
    }
    for handler in &element.handlers {
        listen(&node, handler, dispatch)?;
    }
    for child in &element.children {
        node.append_child(&create_node(document, child, dispatch)?)?;
    }
    Ok(node)
}

fn listen(node: &web_sys::Element, handler: &Handler, dispatch: fn(Action)) -> Result<(), JsValue> {
    let (event_type, listener): (&str, Box<dyn FnMut(web_sys::Event)>) = match handler.to_owned() {
        Handler::Click(action) => (
            "click",
            Box::new(move |_: web_sys::Event| dispatch(action.to_owned())),
        ),
        Handler::TransitionEnd(action) => (
            "transitionend",
            Box::new(move |event: web_sys::Event| {
                // transitions of descendants bubble up
                let target = event.target().map(JsValue::from);
                let current_target = event.current_target().map(JsValue::from);
                if target == current_target {
                    dispatch(action.to_owned());
                }
            }),
        ),
        Handler::SubmitEmail => (
            "submit",
            Box::new(move |event: web_sys::Event| {
                event.prevent_default();
                let email = web_sys::window()
                    .and_then(|window| window.document())
                    .and_then(|document| document.get_element_by_id(EMAIL_INPUT_ID))
                    .and_then(|input| input.dyn_into::<web_sys::HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                dispatch(Action::Popup(ActionPopup::SubmitEmail(email)));
            }),
        ),
    };
    let listener = Closure::wrap(listener);
    node.add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())?;
    // the element owns the listener from now on
    listener.forget();
    Ok(())
}
