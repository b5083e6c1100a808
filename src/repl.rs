use anyhow::Result;
use monkey_interpreter::{new_interpreter, EngineError, ParseErrors};
use rustyline::{error::ReadlineError, DefaultEditor};

const PROMPT: &str = ">> ";

const MONKEY_FACE: &str = r#"
            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

pub fn start() -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut engine = new_interpreter();

    loop {
        let line = match editor.readline(PROMPT) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if line.trim().is_empty() {
            continue;
        }
        editor.add_history_entry(line.as_str())?;

        match engine.run(&line) {
            Ok(result) => println!("{}", result),
            Err(err) => match err.downcast_ref::<EngineError>() {
                Some(EngineError::Parse(ParseErrors(messages))) => {
                    println!("{}", MONKEY_FACE);
                    println!("Woops! We ran into some monkey business here!");
                    println!(" parser errors:");
                    for message in messages {
                        println!("\t{}", message);
                    }
                }
                _ => println!("ERROR: {}", err),
            },
        }
    }

    Ok(())
}
