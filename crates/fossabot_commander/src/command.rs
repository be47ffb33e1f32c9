use crate::Context;

/// Produces the text fossabot sends back to chat.
///
/// `context` is `None` when the [`Commander`](crate::Commander) was asked not
/// to fetch it.
///
/// Any closure `Fn(Option<&Context>) -> anyhow::Result<String>` is a command:
/// ```ignore
/// let greet = |ctx: Option<&Context>| -> anyhow::Result<String> {
///     let name = ctx.and_then(Context::message).map(|msg| msg.user().display_name());
///     Ok(format!("hello {}", name.unwrap_or("chat")))
/// };
/// ```
pub trait Command {
    fn get_response(&self, context: Option<&Context>) -> anyhow::Result<String>;
}

impl<F> Command for F
where
    F: Fn(Option<&Context>) -> anyhow::Result<String>,
{
    fn get_response(&self, context: Option<&Context>) -> anyhow::Result<String> {
        (self)(context)
    }
}
