//! Shared fakes for the unit test suite.
//!
//! `FakeRunner` replays scripted responses keyed by program name and records
//! every invocation; `FakeOutlines` stands in for the PDF library.
//!
//! ```rust
//! let runner = FakeRunner::new().respond("fd", ok("/a.pdf\n"));
//! let pdfs = discover_pdfs(&runner, &search_config()).unwrap();
//! assert_eq!(runner.calls()[0].argv[0], "fd");
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::Path;

use crate::error::{Error, Result};
use crate::pdf::{OutlineNode, OutlineSource, OutlineTarget, PageBox};
use crate::process::{CommandOutput, CommandRunner};

/// One recorded call to the fake runner
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub argv: Vec<String>,
    pub input: Option<String>,
    pub detached: bool,
}

enum Response {
    Output(CommandOutput),
    NotFound,
}

#[derive(Default)]
pub struct FakeRunner {
    responses: RefCell<HashMap<String, VecDeque<Response>>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `output` for the next call of `program`.
    pub fn respond(self, program: &str, output: CommandOutput) -> Self {
        self.push(program, Response::Output(output));
        self
    }

    /// Make the next call of `program` fail as if it were not installed.
    pub fn missing(self, program: &str) -> Self {
        self.push(program, Response::NotFound);
        self
    }

    fn push(&self, program: &str, response: Response) {
        self.responses
            .borrow_mut()
            .entry(program.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn programs(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.argv[0].clone()).collect()
    }

    fn next(&self, program: &str) -> Option<Response> {
        self.responses
            .borrow_mut()
            .get_mut(program)
            .and_then(VecDeque::pop_front)
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, argv: &[String], input: Option<&str>) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(Call {
            argv: argv.to_vec(),
            input: input.map(str::to_string),
            detached: false,
        });
        match self.next(&argv[0]) {
            Some(Response::Output(output)) => Ok(output),
            Some(Response::NotFound) | None => Err(Error::CommandNotFound {
                program: argv[0].clone(),
            }),
        }
    }

    fn spawn_detached(&self, argv: &[String]) -> Result<()> {
        self.calls.borrow_mut().push(Call {
            argv: argv.to_vec(),
            input: None,
            detached: true,
        });
        match self.next(&argv[0]) {
            Some(Response::NotFound) => Err(Error::CommandNotFound {
                program: argv[0].clone(),
            }),
            _ => Ok(()),
        }
    }
}

/// Successful output with `stdout`
pub fn ok(stdout: &str) -> CommandOutput {
    CommandOutput {
        success: true,
        code: Some(0),
        stdout: stdout.to_string(),
    }
}

/// Failed output with exit `code`
pub fn failed(code: i32) -> CommandOutput {
    CommandOutput {
        success: false,
        code: Some(code),
        stdout: String::new(),
    }
}

pub fn words(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Outline source returning a fixed result and counting reads
pub struct FakeOutlines {
    outline: Option<Vec<OutlineNode>>,
    fail: bool,
    reads: RefCell<usize>,
}

impl FakeOutlines {
    pub fn with(outline: Vec<OutlineNode>) -> Self {
        Self {
            outline: Some(outline),
            fail: false,
            reads: RefCell::new(0),
        }
    }

    pub fn none() -> Self {
        Self {
            outline: None,
            fail: false,
            reads: RefCell::new(0),
        }
    }

    pub fn broken() -> Self {
        Self {
            outline: None,
            fail: true,
            reads: RefCell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        *self.reads.borrow()
    }
}

impl OutlineSource for FakeOutlines {
    fn read_outline(&self, _path: &Path) -> Result<Option<Vec<OutlineNode>>> {
        *self.reads.borrow_mut() += 1;
        if self.fail {
            return Err(Error::Pdfium {
                reason: "corrupt".to_string(),
            });
        }
        Ok(self.outline.clone())
    }
}

/// Leaf bookmark pointing at `page` (x, y) on a page of `page_height`
pub fn node(title: &str, page: u32, x: f32, y: f32, page_height: f32) -> OutlineNode {
    OutlineNode {
        title: title.to_string(),
        target: Some(OutlineTarget {
            page,
            x,
            y,
            crop_box: Some(PageBox::with_height(page_height)),
        }),
        children: Vec::new(),
    }
}
