//! Prompt templates.
//!
//! Uses Tera template syntax (similar to Jinja2). Values are inserted
//! verbatim; no escaping is applied.

/// Template for `claude-cloud contribute`.
pub const CONTRIBUTE_TEMPLATE: &str = r#"You are working on the repository {{ repository }}.

{{ task }}

Please:
1. Analyze the issue/task described above
2. Make the necessary code changes
3. Commit your changes with a descriptive message authored as {{ username }} <{{ email }}>
4. Create a pull request with these changes
5. The PR should be created under the name: {{ username }}

Work carefully and make minimal, focused changes to address the issue.
"#;

/// Template for `figma-designer create`.
pub const DESIGN_TEMPLATE: &str = r#"You are working with Figma to complete a design task.

Figma File URL: {{ file_url }}
{% if node_id %}Specific Node ID: {{ node_id }}{% else %}No specific node ID - work with the entire file or main frames{% endif %}

Design Task:
{{ task }}

Please:
1. Open the Figma file using the MCP tools
2. Analyze the current design structure
3. Complete the requested design task
4. Save your changes and provide a summary of what was modified

Use the Figma MCP tools available to interact with the design file.
"#;

/// Template for `figma-designer convert`.
pub const CONVERT_TEMPLATE: &str = r#"You are converting a Figma design to code and integrating it into an existing repository.

Target Repository: {{ repository }}
Repository Path: {{ repo_path }}
Git Branch: {{ branch }}
Your GitHub Username: {{ username }}
Your GitHub Email: {{ email }}

Figma File URL: {{ file_url }}
{% if node_id %}Specific Node ID: {{ node_id }}{% else %}No specific node ID - work with the entire file or main frames{% endif %}

Conversion Task:
{{ task }}

Please follow these steps:

1. **Analyze the Repository's Design System**
   - Examine the existing codebase structure
   - Identify the design system being used (CSS modules, Tailwind, styled-components, etc.)
   - Look for existing component libraries (Material-UI, Ant Design, Chakra UI, custom components, etc.)
   - Check the styling approach and patterns
   - Identify the framework (React, Vue, Angular, Next.js, etc.)
   - Note any existing theme configuration, color schemes, typography scales

2. **Access and Analyze the Figma Design**
   - Use the Figma MCP tools to open and inspect the design
   - Extract all design tokens: colors, spacing, typography, shadows, border radius
   - Identify components, layouts, and responsive breakpoints
   - Note interactions, states (hover, active, disabled), and variants

3. **Match Design to Existing System**
   - Map Figma design tokens to the repository's existing design tokens
   - Reuse existing components when possible (buttons, inputs, cards, etc.)
   - Only create new components when the existing ones don't match the design
   - Follow the repository's coding patterns and conventions

4. **Generate Code**
   - Create/update components following the repository's structure
   - Use the same styling approach as the existing codebase
   - Ensure accessibility (ARIA labels, keyboard navigation, semantic HTML)
   - Make components responsive according to the design specifications
   - Add proper TypeScript types if the repository uses TypeScript
   - Follow the repository's file naming and organization conventions

5. **Integration and Testing**
   - Import and use any existing design system components
   - Create new pages/routes as specified in the conversion task
   - Ensure all imports are correct and dependencies are available
   - Match the existing code style (indentation, quotes, semicolons, etc.)

6. **Documentation**
   - Add JSDoc comments or TSDoc for components
   - Document any new design tokens or utilities created
   - Note any deviations from the Figma design and why

7. **Git Commit**
   - Create a detailed commit message explaining what was converted and why
   - Include your git id ({{ username }}) in the commit
   - Format: "feat: convert [design name] from Figma to code"
   - In the commit body, list:
     * Components created/modified
     * Design tokens added/updated
     * Any deviations from Figma design and reasons
     * Files added/modified/deleted

Important Constraints:
- ALWAYS match the existing design system - do not introduce new styling approaches
- Reuse existing components whenever possible
- Follow the exact coding patterns and conventions in the repository
- If the design conflicts with the existing system, prioritize the existing system and document the deviation
- Do NOT add new dependencies unless absolutely necessary
- Make minimal, focused changes to accomplish the conversion task
- Generate production-ready, maintainable code

Use the Figma MCP tools to interact with the design file and the repository's codebase.
"#;
