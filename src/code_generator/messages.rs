use log::{debug, trace};

use super::CodeGenerator;
use crate::descriptor::{SchemaField, SchemaMessage};
use crate::go_type::go_type;

impl CodeGenerator<'_> {
    pub(super) fn push_messages(&mut self, messages: &[SchemaMessage]) {
        for message in messages {
            self.append_message(message);
        }
    }

    /// Emits the message as a plain struct with one JSON-tagged field per message field, in
    /// declaration order.
    fn append_message(&mut self, message: &SchemaMessage) {
        debug!("  message: {:?}", message.go_name);

        self.buf.push_str("type ");
        self.buf.push_str(&message.go_name);
        self.buf.push_str(" struct {\n");

        let rows: Vec<Vec<String>> = message.fields.iter().map(resolve_field).collect();
        self.push_columns(&rows);

        self.buf.push_str("}\n\n");
    }
}

fn resolve_field(field: &SchemaField) -> Vec<String> {
    let ty = go_type(field.kind, field.message.as_deref(), field.repeated);
    trace!("    field: {:?}, type: {:?}", field.go_name, ty);

    vec![
        field.go_name.clone(),
        ty,
        format!("`json:\"{}\"`", field.json_name),
    ]
}
