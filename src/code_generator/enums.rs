use log::debug;

use super::CodeGenerator;
use crate::descriptor::SchemaEnum;

impl CodeGenerator<'_> {
    pub(super) fn push_enums(&mut self, enums: &[SchemaEnum]) {
        for desc in enums {
            self.append_enum(desc);
        }
    }

    /// Emits the enum as a named `int32` type plus one constant per value.
    ///
    /// Every constant is assigned its declared number explicitly, so gaps and aliases come out
    /// exactly as written in the schema.
    fn append_enum(&mut self, desc: &SchemaEnum) {
        debug!("  enum: {:?}", desc.go_name);

        self.buf.push_str(&format!(
            "// {0} represents the enum values for {0}.\n",
            desc.go_name
        ));
        self.buf.push_str("type ");
        self.buf.push_str(&desc.go_name);
        self.buf.push_str(" int32\n");

        self.buf.push_str("const (\n");
        let rows: Vec<Vec<String>> = desc
            .values
            .iter()
            .map(|value| vec![value.go_name.clone(), format!("= {}", value.number)])
            .collect();
        self.push_columns(&rows);
        self.buf.push_str(")\n\n");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::code_generator::tests::enum_type;

    fn render(desc: &SchemaEnum) -> String {
        let mut buf = String::new();
        CodeGenerator { buf: &mut buf }.append_enum(desc);
        buf
    }

    #[test]
    fn test_numbers_are_not_renumbered() {
        let color = enum_type("Color", &[("RED", 0), ("GREEN", 1), ("BLUE", 5)]);

        assert_eq!(
            "// Color represents the enum values for Color.\n\
             type Color int32\n\
             const (\n\
             \tColor_RED   = 0\n\
             \tColor_GREEN = 1\n\
             \tColor_BLUE  = 5\n\
             )\n\n",
            render(&color)
        );
    }

    #[test]
    fn test_aliases_and_negative_numbers() {
        let status = enum_type(
            "Status",
            &[("UNKNOWN", 0), ("STARTED", 1), ("RUNNING", 1), ("FAILED", -1)],
        );

        assert_eq!(
            "// Status represents the enum values for Status.\n\
             type Status int32\n\
             const (\n\
             \tStatus_UNKNOWN = 0\n\
             \tStatus_STARTED = 1\n\
             \tStatus_RUNNING = 1\n\
             \tStatus_FAILED  = -1\n\
             )\n\n",
            render(&status)
        );
    }

    proptest! {
        #[test]
        fn every_value_keeps_its_number_and_position(
            values in proptest::collection::vec(("[A-Z][A-Z0-9_]{0,10}", any::<i32>()), 1..16),
        ) {
            let values: Vec<(&str, i32)> =
                values.iter().map(|(name, number)| (name.as_str(), *number)).collect();
            let desc = enum_type("Prop", &values);
            let rendered = render(&desc);

            let constants: Vec<(String, i32)> = rendered
                .lines()
                .filter(|line| line.starts_with('\t'))
                .map(|line| {
                    let (name, number) = line.trim().split_once(" = ").unwrap_or_default();
                    (name.trim_end().to_owned(), number.parse().unwrap_or(i32::MAX))
                })
                .collect();
            let expected: Vec<(String, i32)> = values
                .iter()
                .map(|&(name, number)| (format!("Prop_{}", name), number))
                .collect();
            prop_assert_eq!(expected, constants);
        }
    }
}
