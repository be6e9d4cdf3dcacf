//! User accounts that can sign in without a password.

use crate::error::MedicError;
use crate::problem::{Problem, Severity};
use crate::site::Site;

pub struct EmptyPasswords;

impl EmptyPasswords {
    fn accounts(&self, site: &Site) -> Result<Vec<(i64, String)>, MedicError> {
        let mut stmt = site
            .db()
            .prepare("SELECT id, username FROM users WHERE password = '' ORDER BY id")?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut accounts = Vec::new();
        for row in rows {
            accounts.push(row?);
        }
        Ok(accounts)
    }
}

impl Problem for EmptyPasswords {
    fn id(&self) -> &'static str {
        "empty-passwords"
    }

    fn title(&self) -> String {
        "Accounts without a password".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        Ok(!self.accounts(site)?.is_empty())
    }

    fn description(&self, site: &Site) -> Result<String, MedicError> {
        let accounts = self.accounts(site)?;
        let mut description = format!(
            "{} account(s) have an empty password, so anyone who knows the \
             username can sign in:\n",
            accounts.len()
        );
        for (id, username) in &accounts {
            description.push_str(&format!("  - user {id}: {username}\n"));
        }
        if accounts.iter().any(|(_, username)| username == "admin") {
            description.push_str(
                "This includes the admin account, which has full control of the site.\n",
            );
        }
        Ok(description)
    }

    fn solution(&self, _site: &Site) -> Result<String, MedicError> {
        Ok("Set a strong password on each listed account immediately, or \
            suspend the accounts until their owners can be reached. Then turn \
            on the password policy so empty passwords are rejected at the \
            door."
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::fixture_site;

    #[test]
    fn test_no_accounts_no_problem() {
        let site = fixture_site();
        assert!(!EmptyPasswords.exists(&site).unwrap());
    }

    #[test]
    fn test_passworded_accounts_are_fine() {
        let site = fixture_site();
        site.db()
            .execute_batch(
                "INSERT INTO users (id, username, password) VALUES
                     (1, 'admin', '$argon2id$stub'),
                     (2, 'alice', '$argon2id$stub');",
            )
            .unwrap();
        assert!(!EmptyPasswords.exists(&site).unwrap());
    }

    #[test]
    fn test_empty_password_is_detected() {
        let site = fixture_site();
        site.db()
            .execute_batch(
                "INSERT INTO users (id, username, password) VALUES
                     (1, 'admin', ''),
                     (2, 'alice', '$argon2id$stub');",
            )
            .unwrap();
        assert!(EmptyPasswords.exists(&site).unwrap());

        let description = EmptyPasswords.description(&site).unwrap();
        assert!(description.contains("user 1: admin"));
        assert!(description.contains("admin account"));
        assert!(!description.contains("alice"));
    }
}
