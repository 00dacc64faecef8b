use switchboard_webservice::Switchboard;

/// Print every registered operation name, sorted, one per line.
pub fn execute(board: &Switchboard) {
    for name in board.registry().names() {
        println!("{}", name);
    }
}
