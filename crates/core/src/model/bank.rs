use thiserror::Error;

use super::question::{Question, QuestionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank cannot be empty")]
    Empty,

    #[error("invalid question at index {index}: {source}")]
    InvalidQuestion {
        index: usize,
        #[source]
        source: QuestionError,
    },
}

/// Ordered, read-only sequence of questions for one quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `QuestionBankError::Empty` if no questions are given.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionBankError> {
        if questions.is_empty() {
            return Err(QuestionBankError::Empty);
        }
        Ok(Self { questions })
    }

    /// Build a bank from `(text, options, correct)` rows.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::InvalidQuestion` with the offending row index,
    /// or `QuestionBankError::Empty`.
    pub fn from_rows<'a>(
        rows: impl IntoIterator<Item = (&'a str, [&'a str; 4], &'a str)>,
    ) -> Result<Self, QuestionBankError> {
        let questions = rows
            .into_iter()
            .enumerate()
            .map(|(index, (text, options, correct))| {
                Question::new(text, options, correct)
                    .map_err(|source| QuestionBankError::InvalidQuestion { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(questions)
    }

    /// The fixed ten-question JavaScript quiz.
    ///
    /// # Panics
    ///
    /// Panics if the built-in rows fail validation.
    #[must_use]
    pub fn javascript_basics() -> Self {
        Self::from_rows(JAVASCRIPT_BASICS).expect("built-in question bank should be valid")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len() - 1
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::javascript_basics()
    }
}

const JAVASCRIPT_BASICS: [(&str, [&str; 4], &str); 10] = [
    (
        "O que é uma variável em JavaScript?",
        [
            "Um valor que não pode ser alterado",
            "Um tipo de dado fixo",
            "Um espaço de memória para armazenar dados",
            "Uma função que retorna um valor",
        ],
        "Um espaço de memória para armazenar dados",
    ),
    (
        "Qual é o método para adicionar um item no final de um array?",
        ["push()", "pop()", "shift()", "unshift()"],
        "push()",
    ),
    (
        "O que faz a palavra-chave 'let' em JavaScript?",
        [
            "Declara uma variável que pode ser reatribuída",
            "Declara uma constante que não pode ser reatribuída",
            "Cria uma função anônima",
            "Define um tipo de dado",
        ],
        "Declara uma variável que pode ser reatribuída",
    ),
    (
        "Qual é o operador usado para comparar igualdade em JavaScript?",
        ["==", "===", "!=", "!=="],
        "===",
    ),
    (
        "O que a função `parseInt('10')` retorna em JavaScript?",
        ["'10'", "10", "NaN", "undefined"],
        "10",
    ),
    (
        "Como você cria uma função anônima em JavaScript?",
        ["function() {}", "() => {}", "function: {}", "function anon() {}"],
        "() => {}",
    ),
    (
        "Qual é o resultado de `[] + []` em JavaScript?",
        ["[]", "NaN", "'' (string vazia)", "Error"],
        "'' (string vazia)",
    ),
    (
        "O que a palavra-chave `const` faz em JavaScript?",
        [
            "Declara uma variável que não pode ser reatribuída",
            "Declara uma variável que pode ser reatribuída",
            "Declara uma constante que é imutável",
            "Declara uma função",
        ],
        "Declara uma variável que não pode ser reatribuída",
    ),
    (
        "O que é uma 'closure' em JavaScript?",
        [
            "Uma função dentro de outra função",
            "Uma função que retorna outra função",
            "Uma função que acessa variáveis de seu escopo externo",
            "Um tipo de objeto especial",
        ],
        "Uma função que acessa variáveis de seu escopo externo",
    ),
    (
        "O que significa 'hoisting' em JavaScript?",
        [
            "Eleva a declaração das variáveis para o topo do código",
            "Atribui um valor para as variáveis automaticamente",
            "Define a ordem de execução do código",
            "Não há nada chamado hoisting",
        ],
        "Eleva a declaração das variáveis para o topo do código",
    ),
];
