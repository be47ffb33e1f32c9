/// The last path segment of a type name, generics included.
///
/// `fossabot_commander::commander::Commander` becomes `Commander`.
pub fn type_name<T: ?Sized>() -> &'static str {
    let name = std::any::type_name::<T>();
    let end = name.find('<').unwrap_or(name.len());
    match name[..end].rfind("::") {
        Some(pos) => &name[pos + 2..],
        None => name,
    }
}
