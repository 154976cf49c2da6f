pub mod mock_mail_dispatcher;
pub mod postmark_mail_dispatcher;

pub use mock_mail_dispatcher::{MockMailDispatcher, SentMail};
pub use postmark_mail_dispatcher::PostmarkMailDispatcher;
