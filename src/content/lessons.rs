//! Lesson bodies. Lightweight markup, one construct per line:
//! `# `/`## ` headings, `I. ` roman section heads, `> ` callouts,
//! `1. ` numbered steps, `. ` bullets, `![alt](url)` images,
//! `**bold**` and `[text](url)` inline.

pub const COMP_BASICS_LESSON_1: &str = "\
# What is computer hardware?

Hardware is every part of the computer you can touch. Software is the set of programs that run on it.

I. The main parts
1. The system unit holds the processor, the memory and the storage drive.
2. The monitor shows you what the computer is doing.
3. The keyboard and mouse let you give commands.

![A desktop computer and its parts](https://assets.my-skills.app/lessons/hardware-overview.png)

> You can replace one part without replacing the whole computer.

II. Inside the case
. The **CPU** does the actual computing.
. The **RAM** keeps the programs you have open right now.
. The **hard drive** keeps your files after the power goes off.

When you press the power button, all of these parts start working together.";

pub const COMP_BASICS_LESSON_2: &str = "\
# Using the mouse and keyboard

## The mouse
1. A single left click selects an item.
2. A double left click opens it.
3. A right click shows a menu of extra actions.

> Practice double clicking on an empty spot of the desktop. Nothing breaks.

## The keyboard
. Letter keys type text.
. **Enter** confirms, **Esc** cancels.
. Hold **Shift** while typing a letter to make it a capital.

See [a printable keyboard map](https://assets.my-skills.app/lessons/keyboard-map.pdf) if you want to practice away from the computer.";

pub const COMP_BASICS_LESSON_3: &str = "\
# The desktop and the Start menu

The desktop is the first screen you see after logging in.

I. Parts of the desktop
. Icons are shortcuts to programs and files.
. The taskbar at the bottom shows the programs that are open.
. The clock and the network icon live in the corner.

II. The Start menu
1. Click the Start button in the corner of the taskbar.
2. Type the name of a program.
3. Press **Enter** to open the first result.

> The fastest way to open anything is Start, type, Enter.";

pub const COMP_BASICS_LESSON_4: &str = "\
# Creating and organizing folders

## Why folders?
A folder groups related files so you can find them again.

## Making one
1. Right click an empty area of the desktop.
2. Point at **New**, then click **Folder**.
3. Type a name and press **Enter**.

![The New Folder menu](https://assets.my-skills.app/lessons/new-folder.png)

> Rename a folder any time: right click it and choose **Rename**.

. Keep school work in one folder per course.
. Keep photos out of your documents folder.";

pub const WORD_LESSON_1: &str = "\
# What is Microsoft Word?

Microsoft Word is a word processing program: you use it to write, edit and print documents.

I. What you can make with it
. Letters and reports
. Homework assignments
. Tables and simple flyers

> A Word file usually ends in **.docx**.

II. The screen
1. The ribbon across the top holds every command.
2. The white page in the middle is where you type.
3. The status bar at the bottom counts your words.

![The Word window with the ribbon highlighted](https://assets.my-skills.app/lessons/word-window.png)";

pub const WORD_LESSON_2: &str = "\
# Opening Word and starting a document

1. Open the Start menu.
2. Type **Word** and press Enter.
3. Choose **Blank document**.

> If you open the wrong template, close it and choose Blank document again.

## Saving your work
1. Click **File**, then **Save As**.
2. Pick the folder you made for this course.
3. Give the file a name you will recognize next week.

. Save early, save often.
. The shortcut is **Ctrl+S**.

More shortcuts are listed in [the official reference](https://support.microsoft.com/word-shortcuts).";

pub const WORD_LESSON_3: &str = "\
# Formatting text

II. Make it readable, not decorated

1. Select the text with the mouse.
2. Use **B** for bold, *once*, on the words that matter.
3. Pick one font for the whole document.

> Exercise: type one paragraph about your day and make exactly three words bold.

. Headings a little larger than body text.
. One empty line between paragraphs.";

pub const EXCEL_LESSON_1: &str = "\
# Meet the spreadsheet

A spreadsheet is a grid of cells. Each cell holds a number, a word or a formula.

I. Finding your way
1. Columns are letters, rows are numbers.
2. Cell **B3** is column B, row 3.
3. The name box in the corner shows the address of the selected cell.

![An empty worksheet grid](https://assets.my-skills.app/lessons/excel-grid.png)

> Click any cell and just start typing. Enter moves you down, Tab moves you right.";

pub const EXCEL_LESSON_2: &str = "\
# Your first formula

## Formulas start with =
1. Click an empty cell.
2. Type **=2+3** and press Enter.
3. The cell shows 5; the formula bar still shows the formula.

## Adding a column of numbers
1. Put a few numbers in cells A1 to A4.
2. In A5 type **=SUM(A1:A4)**.

> Exercise: build a list of five purchases and total them with SUM.

. Formulas recalculate on their own when a number changes.
. Never type a total by hand.";
