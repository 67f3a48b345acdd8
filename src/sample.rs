//! The built-in welcome document shown when no file is given at startup.

pub const WELCOME: &str = r#"# Welcome to the markpane previewer!

## This is a sub-heading...
### And here's some other cool stuff:

Heres some code, `<div></div>`, between 2 backticks.

```
// this is multi-line code:

function anotherExample(firstLine, lastLine) {
  if (firstLine == '```' && lastLine == '```') {
    return multiLineCode;
  }
}
```

You can also make text **bold**... whoa!
Or _italic_.
Or... wait for it... **_both!_**
And feel free to go crazy ~~crossing stuff out~~.

There's also [links](https://www.freecodecamp.org), and
> Block Quotes!

And if you want to get really crazy, even tables:

Wild Header | Crazy Header | Another Header?
------------ | ------------- | -------------
Your content can | be here, and it | can be here....
And here. | Okay. | I think we get it.

- And of course there are lists.
  - Some are bulleted.
     - With different indentation levels.
        - That look like this.


1. And there are numbered lists too.
1. Use just 1s if you want!
1. And last but not least, let's not forget embedded images:

![freeCodeCamp Logo](https://cdn.freecodecamp.org/testable-projects-fcc/images/fcc_secondary.svg)
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_document_parses() {
        let doc = crate::document::parse(WELCOME).unwrap();
        assert!(doc.line_count() > 0);
    }

    #[test]
    fn test_welcome_document_exercises_major_elements() {
        use crate::document::LineType;
        let doc = crate::document::parse(WELCOME).unwrap();
        let has = |t: &LineType| doc.lines().iter().any(|l| l.line_type() == t);
        assert!(has(&LineType::Heading(1)));
        assert!(has(&LineType::CodeBlock));
        assert!(has(&LineType::BlockQuote));
        assert!(has(&LineType::Table));
        assert!(has(&LineType::Image));
    }
}
