use bfhl_core::envelope::Identity;

/// Identity reported alongside every classification
#[derive(Debug, Clone, clap::Args)]
pub struct IdentityOptions {
    /// User ID included in successful responses
    #[arg(long, env = "BFHL_USER_ID", default_value = "neeraj_01012001")]
    pub user_id: String,

    /// Email included in successful responses
    #[arg(long, env = "BFHL_EMAIL", default_value = "neeraj@gmail.com")]
    pub email: String,

    /// Roll number included in successful responses
    #[arg(long, env = "BFHL_ROLL_NUMBER", default_value = "ABCD123")]
    pub roll_number: String,
}

impl From<IdentityOptions> for Identity {
    fn from(options: IdentityOptions) -> Self {
        Identity {
            user_id: options.user_id,
            email: options.email,
            roll_number: options.roll_number,
        }
    }
}
