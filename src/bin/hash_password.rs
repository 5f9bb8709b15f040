//! Print an argon2 hash for a staff password, for use in `[[auth.accounts]]`
//!
//! Usage: hash-password <password>

use equipment_server::repository::credentials::hash_password;

fn main() -> anyhow::Result<()> {
    let Some(password) = std::env::args().nth(1) else {
        anyhow::bail!("usage: hash-password <password>");
    };

    println!("{}", hash_password(&password)?);
    Ok(())
}
