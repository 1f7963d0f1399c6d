use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use learnx_lib::flashcards::ReviewItem;
use learnx_lib::storage::{FileStore, UserId};
use learnx_lib::Tracker;

/// Shared application state for CLI commands
pub struct App {
    pub tracker: Tracker<FileStore>,
    pub user: UserId,
}

impl App {
    /// Open the data directory for one learner
    pub fn new(data_dir: Option<PathBuf>, email: Option<&str>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => FileStore::default_data_dir().context("Failed to get data directory")?,
        };

        let Some(email) = email else {
            bail!("No learner given. Pass --user <email>.");
        };
        if email.trim().is_empty() {
            bail!("Learner email must not be empty");
        }

        log::debug!("Using data directory {:?}", data_dir);

        Ok(Self {
            tracker: Tracker::new(FileStore::new(data_dir)),
            user: UserId::from_email(email),
        })
    }

    /// Find a review item by id prefix
    pub fn find_item(&self, id_prefix: &str) -> Result<ReviewItem> {
        let items = self
            .tracker
            .review_items(&self.user)
            .context("Failed to load review items")?;

        let prefix = id_prefix.to_lowercase();
        let matches: Vec<&ReviewItem> = items
            .iter()
            .filter(|item| item.id.to_string().starts_with(&prefix))
            .collect();

        match matches.len() {
            0 => bail!("No review item matching '{}'", id_prefix),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous review item id '{}'. Matches:\n{}",
                id_prefix,
                matches
                    .iter()
                    .map(|item| format!("  - {} {}", item.id, item.question))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_user_rejected() {
        let temp = TempDir::new().unwrap();

        assert!(App::new(Some(temp.path().to_path_buf()), Some("")).is_err());
        assert!(App::new(Some(temp.path().to_path_buf()), Some("  ")).is_err());
        assert!(App::new(Some(temp.path().to_path_buf()), None).is_err());
        assert!(!temp.path().join("users").exists());
    }

    #[test]
    fn test_user_from_email() {
        let temp = TempDir::new().unwrap();
        let app = App::new(Some(temp.path().to_path_buf()), Some("ada@example.com")).unwrap();
        assert_eq!(app.user.as_str(), "ada_example_com");
    }
}
