//! PlantUML creole markup helpers

pub fn bold(text: &str) -> String {
    format!("**{}**", text)
}

pub fn italic(text: &str) -> String {
    format!("//{}//", text)
}

pub fn mono(text: &str) -> String {
    format!("\"\"{}\"\"", text)
}

pub fn stroke(text: &str) -> String {
    format!("--{}--", text)
}

pub fn wave(text: &str) -> String {
    format!("~~{}~~", text)
}

pub fn under(text: &str) -> String {
    format!("__{}__", text)
}
