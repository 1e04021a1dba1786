mod content;
mod node;

pub use content::Content;
pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id.as_deref() == Some(id) {
        return Some(root);
    }

    for child in root.child_elements() {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find the first element carrying `data-{key}="{value}"`.
pub fn find_by_data<'a>(root: &'a Element, key: &str, value: &str) -> Option<&'a Element> {
    if root.get_data(key) == Some(value) {
        return Some(root);
    }

    root.child_elements()
        .iter()
        .find_map(|child| find_by_data(child, key, value))
}

/// Collect every element with the given class, in document order.
pub fn find_all_by_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    let mut result = Vec::new();
    collect_by_class(root, class, &mut result);
    result
}

fn collect_by_class<'a>(element: &'a Element, class: &str, result: &mut Vec<&'a Element>) {
    if element.has_class(class) {
        result.push(element);
    }
    for child in element.child_elements() {
        collect_by_class(child, class, result);
    }
}
