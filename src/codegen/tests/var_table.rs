use super::{compile, find};
use crate::codegen::Opcode;

#[test]
fn parameter_and_local_slots_never_collide() {
    let templates = compile("void helper(int a) { int b; b = a; } void main() { }");
    let helper = find(&templates, "helper");
    let stores: Vec<usize> = helper
        .instructions
        .iter()
        .filter_map(|i| match i {
            Opcode::Store(slot) => Some(*slot),
            _ => None,
        })
        .collect();
    // param `a` at slot 0, decl `b` at slot 1, assign `b = a` stores slot 1 again.
    assert_eq!(stores, vec![0, 1, 1]);
}

#[test]
fn each_function_gets_an_independent_slot_numbering() {
    let templates = compile("void helper(int a, int b) { } void main() { int x; }");
    let helper = find(&templates, "helper");
    let main = find(&templates, "main");
    assert_eq!(helper.instructions[0], Opcode::Store(0));
    assert_eq!(helper.instructions[1], Opcode::Store(1));
    assert_eq!(main.instructions[1], Opcode::Store(0));
}
