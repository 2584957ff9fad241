//! Identity boundary. Sign-in itself happens in the external provider; the
//! core only classifies its outcome.

use serde::{Deserialize, Serialize};

use crate::content::Language;

/// Closed set of results from the provider's sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "camelCase")]
pub enum SignInOutcome {
    Success,
    Failure(String),
    PopupClosed,
    PopupBlocked,
    RedirectInProgress,
}

impl SignInOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SignInOutcome::Success)
    }

    /// Message shown to the editor on the login screen.
    pub fn message(&self, language: Language) -> String {
        match (self, language) {
            (SignInOutcome::Success, Language::English) => "Signed in.".into(),
            (SignInOutcome::Success, Language::Indonesia) => "Berhasil masuk.".into(),
            (SignInOutcome::Failure(reason), Language::English) => {
                format!("Sign-in failed: {reason}")
            }
            (SignInOutcome::Failure(reason), Language::Indonesia) => {
                format!("Gagal masuk: {reason}")
            }
            (SignInOutcome::PopupClosed, Language::English) => {
                "The sign-in window was closed before finishing.".into()
            }
            (SignInOutcome::PopupClosed, Language::Indonesia) => {
                "Jendela masuk ditutup sebelum selesai.".into()
            }
            (SignInOutcome::PopupBlocked, Language::English) => {
                "Your browser blocked the sign-in window. Allow pop-ups and try again.".into()
            }
            (SignInOutcome::PopupBlocked, Language::Indonesia) => {
                "Browser memblokir jendela masuk. Izinkan pop-up lalu coba lagi.".into()
            }
            (SignInOutcome::RedirectInProgress, Language::English) => {
                "Redirecting to sign in...".into()
            }
            (SignInOutcome::RedirectInProgress, Language::Indonesia) => {
                "Mengalihkan ke halaman masuk...".into()
            }
        }
    }
}

/// The signed-in editor, as vouched for by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSession {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
