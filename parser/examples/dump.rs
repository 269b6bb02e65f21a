use nxml_parser::Reader;
use std::env;
use std::error::Error;
use std::fs;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let file_path = env::args().nth(1).ok_or("Missing file path")?;
    let contents = fs::read_to_string(file_path)?;

    let mut reader = Reader::new(&contents);
    while let Some(ch) = reader.read_char() {
        if ch == '<' {
            let kind = reader.read_open_tag()?;
            println!("{:?}", kind);
        }
    }
    Ok(())
}
