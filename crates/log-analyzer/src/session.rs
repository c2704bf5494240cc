//! 대시보드 로그인 세션
//!
//! 세션은 전역 상태가 아니라 대시보드가 소유하는 값입니다.
//! 자격 증명 검증은 [`CredentialVerifier`] 구현체에 위임합니다.

use tracing::{info, warn};

use logpulse_core::config::DashboardConfig;
use logpulse_core::error::AuthError;
use logpulse_core::pipeline::CredentialVerifier;

/// 설정에 고정된 사용자명/비밀번호로 검증하는 구현체
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    username: String,
    password: String,
}

impl StaticCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl CredentialVerifier for StaticCredentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// 로그인 상태
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<String>,
}

impl Session {
    /// 자격 증명을 검증하고 성공하면 로그인 상태로 전환합니다.
    ///
    /// 실패하면 기존 상태를 그대로 둡니다.
    pub fn login(
        &mut self,
        verifier: &dyn CredentialVerifier,
        username: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        if !verifier.verify(username, password) {
            warn!(username, "dashboard login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        info!(username, "dashboard login");
        self.user = Some(username.to_owned());
        Ok(())
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(username = %user, "dashboard logout");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// 로그인한 사용자명
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_with_valid_credentials() {
        let verifier = StaticCredentials::new("admin", "admin123");
        let mut session = Session::default();
        session.login(&verifier, "admin", "admin123").unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.user(), Some("admin"));
    }

    #[test]
    fn login_with_wrong_password_is_rejected() {
        let verifier = StaticCredentials::new("admin", "admin123");
        let mut session = Session::default();
        let err = session.login(&verifier, "admin", "wrong").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn logout_clears_session() {
        let verifier = StaticCredentials::from_config(&DashboardConfig::default());
        let mut session = Session::default();
        session.login(&verifier, "admin", "admin123").unwrap();
        session.logout();
        assert_eq!(session, Session::default());
        // 두 번 로그아웃해도 문제 없음
        session.logout();
    }
}
