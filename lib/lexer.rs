use crate::token::Token;

/// Pull-based tokenizer. Once the input is exhausted every call to
/// [`Lexer::next_token`] returns [`Token::Eof`].
pub struct Lexer {
    chars: Vec<char>,
    position: usize,
    char: Option<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let char = chars.first().copied();
        Self {
            chars,
            position: 0,
            char,
        }
    }

    pub fn next_token(&mut self) -> Token {
        while self
            .char
            .is_some_and(|char| matches!(char, ' ' | '\t' | '\r' | '\n'))
        {
            self.read_char();
        }

        let char = match self.char {
            Some(char) => char,
            None => return Token::Eof,
        };

        let token = match char {
            '=' if self.is_next_char('=') => {
                self.read_char();
                Token::Eq
            }
            '=' => Token::Assign,
            '!' if self.is_next_char('=') => {
                self.read_char();
                Token::NotEq
            }
            '!' => Token::Bang,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Asterisk,
            '/' => Token::Slash,
            '<' => Token::Lt,
            '>' => Token::Gt,
            ';' => Token::Semicolon,
            ',' => Token::Comma,
            ':' => Token::Colon,
            '(' => Token::Lparen,
            ')' => Token::Rparen,
            '{' => Token::Lbrace,
            '}' => Token::Rbrace,
            '[' => Token::Lbracket,
            ']' => Token::Rbracket,
            '"' => {
                self.read_char();
                // An unterminated string runs to the end of the input.
                let literal = self.read_while(|char| char != '"');
                self.read_char();
                return Token::String(literal);
            }
            _ if char.is_ascii_digit() => {
                let literal = self.read_while(|char| char.is_ascii_digit());
                return Token::Int(literal);
            }
            _ if is_identifier_start(char) => {
                let literal =
                    self.read_while(|char| is_identifier_start(char) || char.is_ascii_digit());
                return lookup_identifier(literal);
            }
            _ => Token::Illegal(char.to_string()),
        };

        self.read_char();

        token
    }

    fn read_char(&mut self) {
        if self.position < self.chars.len() {
            self.position += 1;
        }
        self.char = self.chars.get(self.position).copied();
    }

    fn is_next_char(&self, ch: char) -> bool {
        self.chars.get(self.position + 1).eq(&Some(&ch))
    }

    fn read_while(&mut self, condition: impl Fn(char) -> bool) -> String {
        let mut literal = String::new();
        while let Some(char) = self.char {
            if !condition(char) {
                break;
            }
            literal.push(char);
            self.read_char();
        }
        literal
    }
}

fn is_identifier_start(char: char) -> bool {
    char.is_ascii_alphabetic() || char == '_'
}

fn lookup_identifier(literal: String) -> Token {
    match literal.as_str() {
        "let" => Token::Let,
        "fn" => Token::Function,
        "true" => Token::True,
        "false" => Token::False,
        "if" => Token::If,
        "else" => Token::Else,
        "return" => Token::Return,
        _ => Token::Ident(literal),
    }
}
