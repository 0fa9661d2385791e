#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    DecoratorArgNotLiteral = 1001,
    DecoratorArityWrong = 1002,

    ValueHasWrongType = 1010,

    ComponentMissingTemplate = 2001,

    /// Raised when an component cannot resolve an external resource, such as a template or a style
    /// sheet.
    ComponentResourceNotFound = 2008,

    /// Raised when the compiler cannot parse a component's template.
    TemplateParseError = 5002,

    /// No matching directive was found for a `#ref="target"` expression.
    MissingReferenceTarget = 8003,

    /// No matching pipe was found for a `| name` pipe expression.
    MissingPipe = 8004,

    /// The left-hand side of an assignment expression was a template variable. Effectively, the
    /// template looked like:
    ///
    /// ```html
    /// <ng-template let-something>
    ///   <button (click)="something = ...">...</button>
    /// </ng-template>
    /// ```
    ///
    /// Template variables are read-only.
    WriteToReadOnlyVariable = 8005,

    /// A template variable was declared twice. For example:
    ///
    /// ```html
    /// <div *ngFor="let i of items; let i = index">
    /// </div>
    /// ```
    DuplicateVariableDeclaration = 8006,

    /// A structural directive is used in a template, but no directive in the program matches it.
    MissingStructuralDirective = 8116,
}

impl ErrorCode {
    pub fn code(self) -> u32 {
        self as u32
    }
}
