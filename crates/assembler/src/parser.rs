//! Parser for procal program tokens → function headers and operations.

use crate::error::AsmError;
use crate::lexer::Token;
use procal_common::{DecodeError, Op, Opcode};

/// Keyword that opens a function block.
pub(crate) const FUNC_KEYWORD: &str = "FUNC";

/// Result of parsing a single program line.
#[derive(Debug, PartialEq)]
pub(crate) enum ParseResult {
    /// `FUNC <name>`: start a new function.
    Function(String),
    /// An instruction for the current function.
    Instruction(Op),
}

/// Parse the tokens of a single line.
///
/// Returns `Ok(None)` for blank lines (empty token list).
pub(crate) fn parse_line(
    tokens: &[Token],
    line_num: usize,
) -> Result<Option<ParseResult>, AsmError> {
    let Some(first) = tokens.first() else {
        return Ok(None);
    };

    let mnemonic = match first {
        Token::Word(w) => w.to_uppercase(),
        Token::Str(_) => {
            return Err(AsmError::UnexpectedToken {
                line: line_num,
                token: first.text(),
            })
        }
    };
    let args = &tokens[1..];

    if mnemonic == FUNC_KEYWORD {
        let name = expect_word(args, line_num, FUNC_KEYWORD)?;
        expect_end(&args[1..], line_num)?;
        return Ok(Some(ParseResult::Function(name)));
    }

    let opcode = Opcode::from_mnemonic(&mnemonic).map_err(|_| AsmError::UnknownOpcode {
        line: line_num,
        token: first.text(),
    })?;

    let arg = if opcode.takes_argument() {
        let arg = match opcode {
            Opcode::Input => expect_prompt(args, line_num, opcode.mnemonic())?,
            _ => expect_word(args, line_num, opcode.mnemonic())?,
        };
        expect_end(&args[1..], line_num)?;
        Some(arg)
    } else {
        expect_end(args, line_num)?;
        None
    };

    let op = Op::from_parts(opcode, arg.as_deref()).map_err(|e| match e {
        DecodeError::InvalidNumber(token) => AsmError::InvalidNumber {
            line: line_num,
            token,
        },
        DecodeError::UnknownOpcode(token) => AsmError::UnknownOpcode {
            line: line_num,
            token,
        },
    })?;
    Ok(Some(ParseResult::Instruction(op)))
}

/// Expect a prompt: a quoted string or a bare word.
fn expect_prompt(
    args: &[Token],
    line_num: usize,
    opcode: &'static str,
) -> Result<String, AsmError> {
    match args.first() {
        Some(Token::Str(s)) | Some(Token::Word(s)) => Ok(s.clone()),
        None => Err(AsmError::MissingArgument {
            line: line_num,
            opcode,
            expected: 1,
        }),
    }
}

/// Expect a bare word as the first argument.
fn expect_word(
    args: &[Token],
    line_num: usize,
    opcode: &'static str,
) -> Result<String, AsmError> {
    match args.first() {
        Some(Token::Word(w)) => Ok(w.clone()),
        Some(other) => Err(AsmError::UnexpectedToken {
            line: line_num,
            token: other.text(),
        }),
        None => Err(AsmError::MissingArgument {
            line: line_num,
            opcode,
            expected: 1,
        }),
    }
}

/// Expect no more tokens.
fn expect_end(args: &[Token], line_num: usize) -> Result<(), AsmError> {
    match args.first() {
        None => Ok(()),
        Some(extra) => Err(AsmError::UnexpectedToken {
            line: line_num,
            token: extra.text(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize_line;

    fn parse(line: &str) -> Result<Option<ParseResult>, AsmError> {
        parse_line(&tokenize_line(line, 1)?, 1)
    }

    fn instr(line: &str) -> Op {
        match parse(line).unwrap() {
            Some(ParseResult::Instruction(op)) => op,
            other => panic!("expected instruction, got {other:?}"),
        }
    }

    #[test]
    fn blank_line() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn function_header() {
        assert_eq!(
            parse("func Square").unwrap(),
            Some(ParseResult::Function("Square".to_string()))
        );
    }

    #[test]
    fn function_header_needs_name() {
        assert!(matches!(
            parse("FUNC"),
            Err(AsmError::MissingArgument {
                opcode: "FUNC",
                ..
            })
        ));
    }

    #[test]
    fn plain_instructions() {
        assert_eq!(instr("add"), Op::Add);
        assert_eq!(instr("SUB"), Op::Subtract);
        assert_eq!(instr("Mul"), Op::Multiply);
        assert_eq!(instr("DIV"), Op::Divide);
        assert_eq!(instr("SIN"), Op::Sine);
        assert_eq!(instr("COS"), Op::Cosine);
        assert_eq!(instr("TAN"), Op::Tangent);
        assert_eq!(instr("DUP"), Op::Duplicate);
    }

    #[test]
    fn push_number() {
        assert_eq!(instr("PUSH 42"), Op::PushNumber(42.0));
        assert_eq!(instr("PUSH -0.5"), Op::PushNumber(-0.5));
        assert_eq!(instr("PUSH 1e3"), Op::PushNumber(1000.0));
    }

    #[test]
    fn push_rejects_non_number() {
        assert_eq!(
            parse("PUSH ten"),
            Err(AsmError::InvalidNumber {
                line: 1,
                token: "ten".to_string()
            })
        );
    }

    #[test]
    fn push_rejects_string() {
        assert!(matches!(
            parse(r#"PUSH "1""#),
            Err(AsmError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn input_accepts_quoted_or_bare_prompt() {
        assert_eq!(instr(r#"INPUT "x = ?""#), Op::ReadInput("x = ?".to_string()));
        assert_eq!(instr("INPUT x?"), Op::ReadInput("x?".to_string()));
    }

    #[test]
    fn names_keep_case() {
        assert_eq!(instr("LABEL Top"), Op::Label("Top".to_string()));
        assert_eq!(instr("goto Top"), Op::Goto("Top".to_string()));
        assert_eq!(instr("CALL mySquare"), Op::CallFunction("mySquare".to_string()));
    }

    #[test]
    fn missing_argument() {
        assert_eq!(
            parse("GOTO"),
            Err(AsmError::MissingArgument {
                line: 1,
                opcode: "GOTO",
                expected: 1
            })
        );
        assert!(matches!(
            parse("INPUT"),
            Err(AsmError::MissingArgument { opcode: "INPUT", .. })
        ));
    }

    #[test]
    fn extra_tokens_rejected() {
        assert_eq!(
            parse("ADD 1"),
            Err(AsmError::UnexpectedToken {
                line: 1,
                token: "1".to_string()
            })
        );
        assert!(matches!(
            parse("CALL f g"),
            Err(AsmError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn unknown_mnemonic_reports_original_spelling() {
        assert_eq!(
            parse("jmp L"),
            Err(AsmError::UnknownOpcode {
                line: 1,
                token: "jmp".to_string()
            })
        );
    }

    #[test]
    fn leading_string_rejected() {
        assert!(matches!(
            parse(r#""PUSH" 1"#),
            Err(AsmError::UnexpectedToken { .. })
        ));
    }
}
