#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstClass {
    Alu,
    Mem,
    Ctrl,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    #[default]
    Add,
    Sub,
    And,
    Or,
    Xor,
    Slt,
    Sltu,
    Sll,
    Srl,
    Sra,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    #[default]
    Reg1,
    Pc,
    Zero,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    #[default]
    Reg2,
    ImmI,
    ImmU,
}

/// Per-instruction control record, one per decode table row.
#[derive(Clone, Copy, Debug)]
pub struct ControlSignals {
    pub class: InstClass,
    pub alu: AluOp,
    pub a_src: OpASrc,
    pub b_src: OpBSrc,
    pub mem_read: bool,
    pub mem_write: bool,
}
