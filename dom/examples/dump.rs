use nxml_dom::{Config, Format, XmlDocument};
use std::error::Error;
use std::io::Read;
use std::{env, fs, io};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut file = None;
    let mut config = Config::readable();

    let mut args = env::args();
    args.next(); // skip exe.
    for arg in args {
        match arg.as_str() {
            "--compact" => config.format = Format::Compact,
            "--no-strict" => config.strict = false,
            _ => {
                if file.is_some() {
                    return Err("Specify `file path` only once.".into());
                }

                file = Some(arg);
            }
        }
    }

    let contents = match file {
        Some(path) => fs::read(path)?,
        _ => {
            let mut contents = vec![];
            io::stdin().read_to_end(&mut contents)?;
            contents
        }
    };

    let mut dom = XmlDocument::with_config(config);
    dom.read_from_bytes(&contents)?;
    print!("{}", dom.to_xml_string()?);
    Ok(())
}
