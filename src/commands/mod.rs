pub mod bedwars;

pub fn commands() -> Vec<poise::Command<crate::Data, crate::Error>> {
    vec![
        // Bed Wars
        bedwars::void::void(),
    ]
}
