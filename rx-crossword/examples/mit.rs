//! The well-known side-7 hexagonal regex crossword. Solves it and prints
//! the hexagon.

use itertools::Itertools;
use rx_crossword::{CompileError, Regex, Solver};

fn main() {
    let x_patterns = [
        r".*H.*H.*",
        r"(DI|NS|TH|OM)*",
        r"F.*[AO].*[AO].*",
        r"(O|RHH|MM)*",
        r".*",
        r"C*MC(CCC|MM)*",
        r"[^C]*[^R]*III.*",
        r"(...?)\1*",
        r"([^X]|XCC)*",
        r"(RR|HHH)*.?",
        r"N.*X.X.X.*E",
        r"R*D*M*",
        r".(C|HH)*",
    ];

    let y_patterns = [
        r"(ND|ET|IN)[^X]*",
        r"[CHMNOR]*I[CHMNOR]*",
        r"P+(..)\1.*",
        r"(E|CR|MN)*",
        r"([^MC]|MM|CC)*",
        r"[AM]*CM(RC)*R?",
        r".*",
        r".*PRR.*DDC.*",
        r"(HHX|[^HX])*",
        r"([^EMC]|EM)*",
        r".*OXR.*",
        r".*LR.*RL.*",
        r".*SE.*UE.*",
    ];

    let z_patterns = [
        r".*G.*V.*H.*",
        r"[CR]*",
        r".*XEXM*",
        r".*DD.*CCM.*",
        r".*XHCR.*X.*",
        r".*(.)(.)(.)(.)\4\3\2\1.*",
        r".*(IN|SE|HI)",
        r"[^C]*MMM[^C]*",
        r".*(.)C\1X\1.*",
        r"[CEIMU]*OH[AEMOR]*",
        r"(RX|[^R])*",
        r"[^M]*M[^M]*",
        r"(S|MM|HHH)*",
    ];

    let compile = |patterns: &[&str]| -> Result<Vec<Regex>, CompileError> {
        patterns.iter().map(|p| Regex::compile(p)).try_collect()
    };

    let solved = Solver::builder(7)
        .x_patterns(compile(&x_patterns).unwrap())
        .y_patterns(compile(&y_patterns).unwrap())
        .z_patterns(compile(&z_patterns).unwrap())
        .build()
        .solve()
        .unwrap();

    print!("{solved}");
}
