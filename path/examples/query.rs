use nxml_dom::XmlDocument;
use nxml_path::Navigator;
use std::error::Error;
use std::io::Read;
use std::path::PathBuf;
use std::{env, fs, io};

struct Argument {
    file: Option<PathBuf>,
    path: Option<String>,
    attribute: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let arg = args()?;
    let dom = document(arg.file)?;

    match (arg.path, arg.attribute) {
        (Some(path), Some(name)) => {
            println!("{}", dom.get_attribute(&path, &name));
        }
        (Some(path), None) => {
            let node = dom.node_for_path(&path).ok_or("Path not found.")?;
            let node = node.borrow();
            if node.child_count() == 0 {
                println!("{}", node.value());
            } else {
                for path in dom.node_paths_for(&path) {
                    println!("{}", path);
                }
            }
        }
        (None, _) => {
            for path in dom.node_paths() {
                println!("{}", path);
            }
        }
    }

    Ok(())
}

fn args() -> Result<Argument, Box<dyn Error>> {
    let mut file = None;
    let mut path = None;
    let mut attribute = None;

    let mut args = env::args();
    args.next(); // skip exe.
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--path" => {
                if path.is_some() {
                    return Err("Specify `--path` only once.".into());
                }

                path = Some(args.next().ok_or("Specify value of `--path`.")?);
            }
            "--attr" => {
                attribute = Some(args.next().ok_or("Specify value of `--attr`.")?);
            }
            _ => {
                if file.is_some() {
                    return Err("Specify `file path` only once.".into());
                }

                file = Some(PathBuf::from(arg));
            }
        }
    }

    if attribute.is_some() && path.is_none() {
        return Err("Specify `--path` with `--attr`.".into());
    }

    Ok(Argument {
        file,
        path,
        attribute,
    })
}

fn document(path: Option<PathBuf>) -> Result<XmlDocument, Box<dyn Error>> {
    let contents = match path {
        Some(path) => fs::read(path)?,
        _ => {
            let mut contents = vec![];
            io::stdin().read_to_end(&mut contents)?;
            contents
        }
    };

    let mut dom = XmlDocument::new();
    dom.read_from_bytes(&contents)?;
    Ok(dom)
}
