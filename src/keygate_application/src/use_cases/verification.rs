use std::time::Duration;

use keygate_core::{
    CodeRedemption, Email, MailDispatchError, MailDispatcher, VerificationCode,
    VerificationCodeCache,
};

/// How long an issued code stays redeemable.
pub const VERIFICATION_CODE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, thiserror::Error)]
pub enum SendCodeError {
    #[error("Failed to send verification email: {0}")]
    Mail(#[from] MailDispatchError),
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RedeemCodeError {
    #[error("Invalid verification code.")]
    Mismatch,
    #[error("Verification code has expired or was never issued.")]
    ExpiredOrMissing,
}

/// Verification use case - sends one-time codes and validates redemptions.
///
/// Issuing a new code for an email supersedes any prior unredeemed code for
/// it: both land in the same cache slot.
pub struct VerificationUseCase<C, M>
where
    C: VerificationCodeCache,
    M: MailDispatcher,
{
    code_cache: C,
    mail_dispatcher: M,
    verify_page_url: String,
}

impl<C, M> VerificationUseCase<C, M>
where
    C: VerificationCodeCache,
    M: MailDispatcher,
{
    pub fn new(code_cache: C, mail_dispatcher: M, verify_page_url: String) -> Self {
        Self {
            code_cache,
            mail_dispatcher,
            verify_page_url,
        }
    }

    /// Generate a code, dispatch the verification email, then store the code
    /// with a 5-minute TTL.
    ///
    /// The cache write happens only after dispatch acceptance, so a mail
    /// failure never leaves a live code for an email nobody received.
    /// Retrying is the caller's decision.
    #[tracing::instrument(name = "VerificationUseCase::send_code", skip(self))]
    pub async fn send_code(&self, email: &Email) -> Result<(), SendCodeError> {
        let code = VerificationCode::generate();
        let subject = format!("Your code is {}.", code.as_str());
        let (text_body, html_body) = self.render_message(email, &code);

        self.mail_dispatcher
            .send(email, &subject, &text_body, &html_body)
            .await?;

        self.code_cache
            .put(email.clone(), code, VERIFICATION_CODE_TTL)
            .await;

        Ok(())
    }

    /// Redeem a submitted code. A match consumes the entry (single use); a
    /// mismatch leaves the live code in place so the user may retry within
    /// the remaining TTL.
    #[tracing::instrument(name = "VerificationUseCase::redeem", skip(self, submitted))]
    pub async fn redeem(&self, email: &Email, submitted: &str) -> Result<(), RedeemCodeError> {
        match self.code_cache.redeem(email, submitted).await {
            CodeRedemption::Redeemed => Ok(()),
            CodeRedemption::Mismatch => Err(RedeemCodeError::Mismatch),
            CodeRedemption::Missing => Err(RedeemCodeError::ExpiredOrMissing),
        }
    }

    fn render_message(&self, email: &Email, code: &VerificationCode) -> (String, String) {
        let link = format!(
            "{}?email={}&code={}",
            self.verify_page_url,
            email.as_str(),
            code.as_str()
        );

        let text_body = format!(
            "Verify Your Email Address\n\n\
             Hello,\n\n\
             To complete your verification, please enter the following code:\n\n\
             {}\n\n\
             Alternatively, you can open the verification page using the following link:\n\
             {}\n\n\
             If you did not initiate this request, please ignore this email or contact support.\n",
            code.as_str(),
            link
        );

        let html_body = format!(
            "<html><body>\
             <h1>Verify Your Email Address</h1>\
             <p>Hello,</p>\
             <p>To complete your verification, please enter the code below or open the verification page.</p>\
             <div style=\"font-size:24px;font-weight:600\">{}</div>\
             <p><a href=\"{}\">Open Verification Page</a></p>\
             <p>If you did not initiate this request, you can safely disregard this email.</p>\
             </body></html>",
            code.as_str(),
            link
        );

        (text_body, html_body)
    }
}

#[cfg(test)]
mod tests {
    use keygate_adapters::email::MockMailDispatcher;
    use keygate_adapters::persistence::InMemoryCodeCache;

    use super::*;

    fn make_use_case(
        mail: MockMailDispatcher,
    ) -> VerificationUseCase<InMemoryCodeCache, MockMailDispatcher> {
        VerificationUseCase::new(
            InMemoryCodeCache::new(),
            mail,
            "https://app.example.com/verify-email".to_string(),
        )
    }

    /// The subject line is `Your code is NNNNNN.`
    fn code_from_subject(subject: &str) -> String {
        subject
            .trim_start_matches("Your code is ")
            .trim_end_matches('.')
            .to_string()
    }

    #[tokio::test]
    async fn sent_code_redeems_exactly_once() {
        let mail = MockMailDispatcher::new();
        let use_case = make_use_case(mail.clone());
        let email = Email::parse("ann@example.com").unwrap();

        use_case.send_code(&email).await.unwrap();
        let code = code_from_subject(&mail.sent()[0].subject);

        assert_eq!(use_case.redeem(&email, &code).await, Ok(()));
        assert_eq!(
            use_case.redeem(&email, &code).await,
            Err(RedeemCodeError::ExpiredOrMissing)
        );
    }

    #[tokio::test]
    async fn mismatch_does_not_consume_the_live_code() {
        let mail = MockMailDispatcher::new();
        let use_case = make_use_case(mail.clone());
        let email = Email::parse("ann@example.com").unwrap();

        use_case.send_code(&email).await.unwrap();
        let code = code_from_subject(&mail.sent()[0].subject);
        let wrong = if code == "111111" { "222222" } else { "111111" };

        assert_eq!(
            use_case.redeem(&email, wrong).await,
            Err(RedeemCodeError::Mismatch)
        );
        assert_eq!(use_case.redeem(&email, &code).await, Ok(()));
    }

    #[tokio::test]
    async fn a_second_code_supersedes_the_first() {
        let mail = MockMailDispatcher::new();
        let use_case = make_use_case(mail.clone());
        let email = Email::parse("bob@example.com").unwrap();

        use_case.send_code(&email).await.unwrap();
        use_case.send_code(&email).await.unwrap();

        let sent = mail.sent();
        let first = code_from_subject(&sent[0].subject);
        let second = code_from_subject(&sent[1].subject);

        if first != second {
            assert_eq!(
                use_case.redeem(&email, &first).await,
                Err(RedeemCodeError::Mismatch)
            );
        }
        assert_eq!(use_case.redeem(&email, &second).await, Ok(()));
    }

    #[tokio::test]
    async fn mail_failure_leaves_no_cached_code() {
        let mail = MockMailDispatcher::failing();
        let cache = InMemoryCodeCache::new();
        let use_case = VerificationUseCase::new(
            cache.clone(),
            mail,
            "https://app.example.com/verify-email".to_string(),
        );
        let email = Email::parse("ann@example.com").unwrap();

        let result = use_case.send_code(&email).await;
        assert!(matches!(result, Err(SendCodeError::Mail(_))));
        assert!(cache.try_get(&email).await.is_none());
    }

    #[tokio::test]
    async fn message_carries_code_and_verification_link() {
        let mail = MockMailDispatcher::new();
        let use_case = make_use_case(mail.clone());
        let email = Email::parse("ann@example.com").unwrap();

        use_case.send_code(&email).await.unwrap();

        let sent = mail.sent();
        let code = code_from_subject(&sent[0].subject);
        assert!(sent[0].text_body.contains(&code));
        assert!(sent[0].html_body.contains(&code));
        assert!(sent[0].text_body.contains(
            &format!("https://app.example.com/verify-email?email=ann@example.com&code={code}")
        ));
    }
}
