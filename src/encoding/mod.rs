/*!
The reduction of a [goal](crate::goal::Goal) to propositional satisfiability.

The central proposition is [Subsumption](Proposition::Subsumption), `Sub(a, b)`, read as `σ(a) ⊑ σ(b)` for the substitution σ of some unifier.
In particular, for a variable `x` and a non-variable atom `h`, `Sub(x, h)` is read as '`h` is a conjunct of σ(x)', and these propositions determine a unifier.

# Structure

An encoding is made by an [Encoder] in a fixed order of steps, each of which appends clauses:
1. [Substitution](Encoder::encode_substitution) propositions `Sub(x, h)` are allocated, for every variable `x` and every non-variable atom `h`.
2. Each [equation](Encoder::encode_equations) `l ≡ ⊓R` relates the conjuncts of its sides: for each non-variable atom `H`, `Sub(b, H) → Sub(l, H)` for each `b ∈ R`, and, unless the equation is primitive, `Sub(l, H) → ⋁ Sub(b, H)`.
3. Facts about non-variable atoms are [fixed](Encoder::encode_structure): distinct constants are not subsumed by one another, nor is a constant by an existential restriction (or the reverse), and `∃r.a ⊑ ∃r.b` exactly when `a ⊑ b`.
4. Subsumptions of the form `Sub(a, y)` with `y` a variable, which arise from existential restrictions, are made [transitive](Encoder::encode_transitivity) through the conjuncts of `y`.
5. A strict [order](Encoder::encode_order) over variables is asserted, with `x` above `y` whenever `∃r.y` is a conjunct of σ(x), and so substitutions are acyclic.
6. [Dissubsumptions](Encoder::encode_dissubsumptions), and disequations, are asserted together with a justification of each.
7. Literals to [minimize](Encoder::encode_minimization) are added, if asked for by the configuration.

Every step iterates the lists of the goal, which are in first-seen order, and so the encoding of a goal is deterministic --- both the ids of propositions and the order of clauses.

# Example

```rust
# use otter_uel::config::Config;
# use otter_uel::db::atom::AtomDB;
# use otter_uel::encoding::{encode, proposition::Proposition};
# use otter_uel::goal::{build_goal, definitions::NoDefinitions};
# use otter_uel::structures::equation::Equation;
let mut atoms = AtomDB::default();
let x = atoms.user_variable("X");
let a = atoms.constant("A");

let goal = build_goal(&mut atoms, [Equation::new(x, [a])], &NoDefinitions).unwrap();
let encoding = encode(&atoms, &goal, &Config::default()).unwrap();

let substitution = Proposition::Subsumption { sub: x, sup: a };
assert_eq!(encoding.propositions().lookup(&substitution), Some(1));
```
*/

pub mod choice;
pub mod proposition;

mod dissubsumption;
mod equations;
mod order;
mod structure;

use indexmap::IndexSet;

use choice::Choice;
use proposition::{Proposition, PropositionDB};

use crate::{
    cnf::SatInput,
    config::{Algorithm, Config, Objective},
    db::atom::AtomDB,
    goal::Goal,
    misc::log::targets::{self},
    structures::{
        atom::{Atom, AtomId},
        clause::CClause,
        literal::{CLiteral, Literal, LiteralId},
    },
    types::err::{self},
};

/// The result of encoding a goal: a clause set together with the propositions its literals refer to.
#[derive(Clone, Debug, Default)]
pub struct Encoding {
    input: SatInput,

    propositions: PropositionDB,
}

impl Encoding {
    pub fn input(&self) -> &SatInput {
        &self.input
    }

    pub fn propositions(&self) -> &PropositionDB {
        &self.propositions
    }

    /// The ids of the propositions which determine a unifier: `Sub(x, h)` for every variable `x` and non-variable atom `h` of `goal`.
    pub fn substitution_ids<'g>(&'g self, goal: &'g Goal) -> impl Iterator<Item = LiteralId> + 'g {
        goal.variables().iter().flat_map(move |&sub| {
            goal.nonvariables().iter().filter_map(move |&sup| {
                self.propositions
                    .lookup(&Proposition::Subsumption { sub, sup })
            })
        })
    }

    /// The clause excluding the unifier of `model`, and no other unifier.
    ///
    /// The clause contains, for each [visible](Goal::visible_variables) variable `x` of the model and each non-variable atom `h`, the literal of `Sub(x, h)` whose polarity is opposite to its value on the model.
    /// The values of substitution propositions of other variables are not seen by the user, and are left free.
    /// If the goal has no user variables the clause is empty, as there is at most one unifier.
    pub fn blocking_clause(&self, goal: &Goal, model: &crate::solver::Model) -> CClause {
        let visible = goal.visible_variables(|sub, sup| self.propositions.holds_on(sub, sup, model));

        visible
            .into_iter()
            .flat_map(|sub| {
                goal.nonvariables().iter().filter_map(move |&sup| {
                    self.propositions
                        .lookup(&Proposition::Subsumption { sub, sup })
                })
            })
            .map(|id| CLiteral::new(id, !model.contains(&id)))
            .collect()
    }
}

/// The encoding of `goal`.
pub fn encode(atoms: &AtomDB, goal: &Goal, config: &Config) -> Result<Encoding, err::ErrorKind> {
    Encoder::new(atoms, goal, config).encode()
}

/// An encoder of a goal.
pub struct Encoder<'g> {
    atoms: &'g AtomDB,

    goal: &'g Goal,

    config: &'g Config,

    input: SatInput,

    propositions: PropositionDB,

    /// A count of choices made, used to tag the propositions of each choice.
    choice_count: u32,

    /// Pairs `(a, y)` with `y` a variable such that `Sub(a, y)` has been used.
    variable_subsumptions: IndexSet<(AtomId, AtomId)>,

    /// Pairs `(a, b)` such that `Dis(a, b)` has been used, in order of first use.
    dissubsumptions: IndexSet<(AtomId, AtomId)>,

    /// The id of [Absurd](Proposition::Absurd), once forced false.
    absurd: Option<LiteralId>,
}

impl<'g> Encoder<'g> {
    pub fn new(atoms: &'g AtomDB, goal: &'g Goal, config: &'g Config) -> Self {
        Encoder {
            atoms,
            goal,
            config,
            input: SatInput::default(),
            propositions: PropositionDB::default(),
            choice_count: 0,
            variable_subsumptions: IndexSet::default(),
            dissubsumptions: IndexSet::default(),
            absurd: None,
        }
    }

    /// Encodes the goal, consuming the encoder.
    pub fn encode(mut self) -> Result<Encoding, err::ErrorKind> {
        for atom in self.goal.atoms() {
            self.atoms.get(*atom)?;
        }

        self.encode_substitution();
        self.encode_equations()?;
        self.encode_structure()?;
        self.encode_transitivity()?;
        self.encode_order()?;
        self.encode_dissubsumptions()?;
        self.encode_minimization()?;

        log::info!(target: targets::ENCODING,
            "Encoding with {} propositions and {} clauses",
            self.propositions.count(),
            self.input.clause_count());

        Ok(Encoding {
            input: self.input,
            propositions: self.propositions,
        })
    }

    /// Allocates `Sub(x, h)` for each variable `x` and non-variable atom `h`, so substitution propositions have the lowest ids.
    pub fn encode_substitution(&mut self) {
        let goal = self.goal;
        for &variable in goal.variables() {
            for &atom in goal.nonvariables() {
                self.subsumption(variable, atom);
            }
        }
        log::debug!(target: targets::ENCODING, "{} substitution propositions", self.propositions.count());
    }

    /// Adds `Sub(x, h)` as a literal to minimize, for each `h` counted by the objective, if minimal unifiers are asked for.
    pub fn encode_minimization(&mut self) -> Result<(), err::ErrorKind> {
        if self.config.algorithm != Algorithm::MinimalSat {
            return Ok(());
        }
        let goal = self.goal;
        for &variable in goal.variables() {
            for &atom in goal.nonvariables() {
                let counted = match self.config.objective {
                    Objective::Conjuncts => true,
                    Objective::Existentials => self.atom(atom)?.is_existential(),
                };
                if counted {
                    let id = self.propositions.id(Proposition::Subsumption {
                        sub: variable,
                        sup: atom,
                    });
                    self.input.add_minimize_literal(id)?;
                }
            }
        }
        Ok(())
    }

    fn atom(&self, id: AtomId) -> Result<Atom, err::ErrorKind> {
        Ok(*self.atoms.get(id)?)
    }

    /// The positive literal of `Sub(sub, sup)`.
    fn subsumption(&mut self, sub: AtomId, sup: AtomId) -> CLiteral {
        self.propositions.literal(Proposition::Subsumption { sub, sup })
    }

    /// The positive literal of `Dis(sub, sup)`, noted for justification on first use.
    fn dissubsumption(&mut self, sub: AtomId, sup: AtomId) -> CLiteral {
        self.dissubsumptions.insert((sub, sup));
        self.propositions
            .literal(Proposition::Dissubsumption { sub, sup })
    }

    fn order(&mut self, greater: AtomId, lesser: AtomId) -> CLiteral {
        self.propositions
            .literal(Proposition::Order { greater, lesser })
    }

    /// The positive literal of [Absurd](Proposition::Absurd), which is forced false on first use.
    fn absurd(&mut self) -> Result<CLiteral, err::ErrorKind> {
        let id = match self.absurd {
            Some(id) => id,
            None => {
                let id = self.propositions.id(Proposition::Absurd);
                self.absurd = Some(id);
                self.clause(vec![CLiteral::new(id, false)])?;
                id
            }
        };
        Ok(CLiteral::new(id, true))
    }

    /// A choice among `size` alternatives, with exclusion clauses added.
    fn choice(&mut self, size: usize) -> Result<Choice, err::ErrorKind> {
        let choice = Choice::new(size, self.choice_count, &mut self.propositions);
        self.choice_count += 1;
        for exclusion in choice.exclusions() {
            self.clause(exclusion)?;
        }
        Ok(choice)
    }

    fn clause(&mut self, clause: CClause) -> Result<(), err::ErrorKind> {
        self.input.add_clause(clause)?;
        Ok(())
    }
}
